/// savings plan - deposits grow a balance instead of repaying a debt
use amortization_rs::{Money, Rate, ScheduleConfig, ScheduleEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== savings plan example ===\n");

    // $1,000 opening balance, $250 a month for 5 years at 4.5%
    let config = ScheduleConfig::savings_plan(
        Money::from_major(1_000),
        Rate::from_bps(450),
        5,
        Money::from_major(250),
    );
    let engine = ScheduleEngine::new(config)?;
    let result = engine.calculate()?;

    for item in result.amortization_list.iter().step_by(12) {
        println!(
            "period {:>3}: balance {:>12} interest to date {:>10}",
            item.period,
            item.principal_balance.round_dp(2),
            item.interest_balance.round_dp(2)
        );
    }

    println!("\ntotal deposited: {}", result.totals.repayment.round_dp(2));
    println!("total interest:  {}", result.totals.interest_paid.round_dp(2));

    Ok(())
}
