/// quick start - minimal example to get started
use transit_fare_rs::{FareCardBuilder, FarePolicy, Line, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // standard card with frequent-use discounts
    let mut card = FareCardBuilder::new()
        .policy(FarePolicy::frequent_rider())
        .set_time(&time)
        .build()?;

    // load 2000 from the preset menu
    card.top_up_option(1)?;

    // ride line 143
    let receipt = Line::new("143", false).pay_with(&mut card)?;
    println!("{}\n", receipt);

    // print current state
    println!("{}", card.json());

    Ok(())
}
