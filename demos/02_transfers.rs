/// transfers - free second ride on a different line within the hour
use transit_fare_rs::{FareCardBuilder, FarePolicy, Line, Money, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== transfers ===\n");

    // wednesday morning
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut card = FareCardBuilder::new()
        .policy(FarePolicy::unrestricted())
        .balance(Money::from_major(10_000))
        .set_time(&time)
        .build()?;

    let urban = Line::new("143", false);
    let crosstown = Line::new("K", false);
    let intercity = Line::new("500", true);

    let first = urban.pay_with(&mut card)?;
    println!("143 at {}: charged {}", first.issued_at().format("%H:%M"), first.amount_charged());

    controller.advance(Duration::minutes(40));
    let transfer = crosstown.pay_with(&mut card)?;
    println!("K at {}: charged {} (transfer)", transfer.issued_at().format("%H:%M"), transfer.amount_charged());

    controller.advance(Duration::minutes(90));
    let long = intercity.pay_with(&mut card)?;
    println!("500 at {}: charged {}", long.issued_at().format("%H:%M"), long.amount_charged());

    println!("\nbalance: {}", card.balance());
    println!("events recorded: {}", card.events().len());

    // top up past the ceiling, the excess waits as pending balance
    card.top_up(Money::from_major(30_000))?;
    card.top_up(Money::from_major(30_000))?;
    println!("\nafter top-ups: balance {}, pending {}", card.balance(), card.pending_balance());

    controller.advance(Duration::hours(3));
    urban.pay_with(&mut card)?;
    println!("after a ride: balance {}, pending {}", card.balance(), card.pending_balance());

    Ok(())
}
