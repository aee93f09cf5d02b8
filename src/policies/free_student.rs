use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::account::CardAccount;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::Event;
use crate::line::Line;
use crate::types::{CardKind, Payment};

use super::in_franchise_hours;

/// student card with a daily allowance of free trips
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FreeStudent {
    trips_today: u32,
}

impl FreeStudent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trips_today(&self) -> u32 {
        self.trips_today
    }

    pub fn pay(
        &mut self,
        account: &mut CardAccount,
        fare: Money,
        line: &Line,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        if !in_franchise_hours(account, now) {
            debug!(card_id = %account.id(), "free student ticket inactive at this hour, charging full fare");
            return account.settle_trip(fare, line, now);
        }

        if !account.rode_today(now) {
            self.trips_today = 0;
        }

        if self.trips_today >= account.config().benefits.daily_benefit_trips {
            info!(card_id = %account.id(), "daily free trips used up, charging full fare");
            return account.settle_trip(fare, line, now);
        }

        self.trips_today += 1;
        let payment = account.settle_trip(Money::ZERO, line, now)?;

        account.events.emit(Event::DiscountApplied {
            card_id: account.id().to_string(),
            policy: CardKind::FreeStudent,
            trip_number: Some(self.trips_today),
            nominal: fare,
            charged: payment.charged,
            timestamp: now,
        });

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FareConfig;
    use crate::errors::FareError;
    use chrono::{Duration, TimeZone};

    fn account(balance: i64) -> CardAccount {
        let mut account = CardAccount::new(CardKind::FreeStudent, FareConfig::standard());
        account.balance = Money::from_major(balance);
        account
    }

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_two_free_trips_then_charged() {
        let mut policy = FreeStudent::new();
        let mut account = account(0);
        let line = Line::new("K", false);

        policy.pay(&mut account, Money::from_major(1580), &line, morning()).unwrap();
        policy.pay(&mut account, Money::from_major(1580), &line, morning() + Duration::minutes(6)).unwrap();
        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(policy.trips_today(), 2);

        let third = policy.pay(&mut account, Money::from_major(1580), &line, morning() + Duration::minutes(12));
        assert!(matches!(third, Err(FareError::InsufficientFunds { .. })));
        assert_eq!(account.balance(), Money::ZERO);
    }

    #[test]
    fn test_third_trip_charged_with_balance() {
        let mut policy = FreeStudent { trips_today: 2 };
        let mut account = account(2000);
        account.last_trip_at = Some(morning() - Duration::minutes(30));
        account.last_trip_line = Some("K".to_string());

        policy.pay(&mut account, Money::from_major(1580), &Line::new("K", false), morning()).unwrap();
        assert_eq!(account.balance(), Money::from_major(420));
    }

    #[test]
    fn test_counter_resets_on_new_day() {
        let mut policy = FreeStudent { trips_today: 2 };
        let mut account = account(0);
        account.last_trip_at = Some(morning() - Duration::days(1));
        account.last_trip_line = Some("K".to_string());

        policy.pay(&mut account, Money::from_major(1580), &Line::new("K", false), morning()).unwrap();

        assert_eq!(account.balance(), Money::ZERO);
        assert_eq!(policy.trips_today(), 1);
    }

    #[test]
    fn test_full_fare_outside_window() {
        let mut policy = FreeStudent::new();
        let mut account = account(2000);
        let early = Utc.with_ymd_and_hms(2025, 4, 5, 5, 30, 0).unwrap();

        policy.pay(&mut account, Money::from_major(1580), &Line::new("K", false), early).unwrap();

        assert_eq!(account.balance(), Money::from_major(420));
        assert_eq!(policy.trips_today(), 0);
    }
}
