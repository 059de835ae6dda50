/// operators - fees, offsets, lump sums, rate changes and extra repayments
use amortization_rs::{
    Frequency, Money, Operator, PeriodWindow, Rate, ScheduleConfig, ScheduleEngine, ScheduledOperator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== operators example ===\n");

    let config = ScheduleConfig::loan(Money::from_major(400_000), Rate::from_percentage(6), 30)
        .with_repayment_frequency(Frequency::Fortnightly)
        // account keeping fee every fortnight
        .with_operator(ScheduledOperator::new(
            Operator::Fee { amount: Money::from_major(5) },
            PeriodWindow::from_period(1),
        ))
        // offset account for the first five years
        .with_operator(ScheduledOperator::new(
            Operator::Offset { amount: Money::from_major(25_000) },
            PeriodWindow::new(1, 130),
        ))
        // bonus paid off the loan after two years
        .with_operator(ScheduledOperator::new(
            Operator::LumpSum { amount: Money::from_major(15_000) },
            PeriodWindow::at(52),
        ))
        // rate rises to 7.5% in year three
        .with_operator(ScheduledOperator::new(
            Operator::InterestRateChange {
                interest_rate: Rate::from_bps(750),
                interest_rate_frequency: None,
            },
            PeriodWindow::from_period(53),
        ))
        // extra $200 a month, converted to fortnights
        .with_operator(ScheduledOperator::new(
            Operator::ExtraRepayment {
                amount: Money::from_major(200),
                frequency: Some(Frequency::Monthly),
            },
            PeriodWindow::from_period(1),
        ));

    let engine = ScheduleEngine::new(config)?;
    let (result, events) = engine.calculate_with_events()?;

    println!("periods:        {}", result.period_count());
    println!("total repaid:   {}", result.totals.repayment.round_dp(2));
    println!("total interest: {}", result.totals.interest_paid.round_dp(2));
    println!("final balance:  {}", result.final_balance().round_dp(2));

    println!("\nevents:");
    for event in events {
        println!("  {:?}", event);
    }

    Ok(())
}
