/// quick start - minimal example to get started
use amortization_rs::{Money, Rate, ScheduleConfig, ScheduleEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $100,000 over 10 years at 10%, monthly repayments
    let config = ScheduleConfig::loan(Money::from_major(100_000), Rate::from_percentage(10), 10);
    let engine = ScheduleEngine::new(config)?;

    let result = engine.calculate()?;

    // print the whole schedule
    println!("{}", result.to_json_pretty()?);

    Ok(())
}
