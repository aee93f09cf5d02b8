/// student cards - daily allowances and the cooldown gate
use transit_fare_rs::{FareCardBuilder, FareError, FarePolicy, Line, Money, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== student cards ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 4, 7, 8, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut half_fare = FareCardBuilder::new()
        .policy(FarePolicy::half_fare_student())
        .balance(Money::from_major(5_000))
        .set_time(&time)
        .build()?;

    let mut free = FareCardBuilder::new()
        .policy(FarePolicy::free_student())
        .set_time(&time)
        .build()?;

    let line = Line::new("K", false);

    for trip in 1..=3 {
        match line.pay_with(&mut half_fare) {
            Ok(receipt) => println!("half fare trip {}: charged {}, balance {}", trip, receipt.amount_charged(), receipt.remaining_balance()),
            Err(e) => println!("half fare trip {}: rejected ({})", trip, e),
        }
        match line.pay_with(&mut free) {
            Ok(receipt) => println!("free trip {}: charged {}, balance {}", trip, receipt.amount_charged(), receipt.remaining_balance()),
            Err(e) => println!("free trip {}: rejected ({})", trip, e),
        }
        controller.advance(Duration::minutes(10));
    }

    // a second tap right away trips the half fare cooldown
    line.pay_with(&mut half_fare)?;
    match line.pay_with(&mut half_fare) {
        Err(FareError::CooldownActive { remaining_seconds }) => {
            println!("\ncooldown active, {} seconds to go", remaining_seconds)
        }
        other => println!("\nunexpected: {:?}", other.map(|r| r.to_string())),
    }

    // next day, allowances are back
    controller.advance(Duration::days(1));
    let receipt = line.pay_with(&mut free)?;
    println!("\nnext day free trip charged {}", receipt.amount_charged());

    Ok(())
}
