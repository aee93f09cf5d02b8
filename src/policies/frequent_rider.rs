use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::account::CardAccount;
use crate::config::FareConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::Event;
use crate::line::Line;
use crate::types::{CardKind, Payment};

/// standard card with monthly frequent-use discounts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequentRider {
    trips_this_period: u32,
}

impl FrequentRider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trips_this_period(&self) -> u32 {
        self.trips_this_period
    }

    /// factor for the current trip count
    pub fn discount_factor(&self, config: &FareConfig) -> Rate {
        config.frequency_factor(self.trips_this_period)
    }

    pub fn pay(
        &mut self,
        account: &mut CardAccount,
        fare: Money,
        line: &Line,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        // period restarts on the first day of every month
        if now.day() == 1 && self.trips_this_period != 0 {
            debug!(card_id = %account.id(), trips = self.trips_this_period, "frequent-use period reset");
            self.trips_this_period = 0;
        }

        let factor = self.discount_factor(account.config());
        let amount = fare.scale(factor);

        let payment = account.settle_trip(amount, line, now)?;
        self.trips_this_period += 1;

        if factor != Rate::ONE {
            account.events.emit(Event::DiscountApplied {
                card_id: account.id().to_string(),
                policy: CardKind::FrequentRider,
                trip_number: Some(self.trips_this_period),
                nominal: fare,
                charged: payment.charged,
                timestamp: now,
            });
        }

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn account(balance: i64) -> CardAccount {
        let mut account = CardAccount::new(CardKind::FrequentRider, FareConfig::standard());
        account.balance = Money::from_major(balance);
        account
    }

    fn mid_month() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_factor_at_thirty_trips() {
        let policy = FrequentRider { trips_this_period: 30 };
        assert_eq!(policy.discount_factor(&FareConfig::standard()), Rate::from_percentage(80));
    }

    #[test]
    fn test_first_trips_pay_full_fare() {
        let mut policy = FrequentRider::new();
        let mut account = account(2000);

        policy
            .pay(&mut account, Money::from_major(1580), &Line::new("143", false), mid_month())
            .unwrap();

        assert_eq!(account.balance(), Money::from_major(420));
        assert_eq!(policy.trips_this_period(), 1);
    }

    #[test]
    fn test_discounted_tiers() {
        let line = Line::new("143", false);

        let mut policy = FrequentRider { trips_this_period: 30 };
        let mut account = account(5000);
        policy.pay(&mut account, Money::from_major(1580), &line, mid_month()).unwrap();
        assert_eq!(account.balance(), Money::from_major(3736));

        let mut policy = FrequentRider { trips_this_period: 60 };
        let mut account = self::account(5000);
        policy.pay(&mut account, Money::from_major(1580), &line, mid_month()).unwrap();
        assert_eq!(account.balance(), Money::from_major(3815));

        let mut policy = FrequentRider { trips_this_period: 81 };
        let mut account = self::account(5000);
        policy.pay(&mut account, Money::from_major(1580), &line, mid_month()).unwrap();
        assert_eq!(account.balance(), Money::from_major(3420));
    }

    #[test]
    fn test_counter_only_moves_on_success() {
        let mut policy = FrequentRider::new();
        let mut account = account(0);

        let result = policy.pay(&mut account, Money::from_major(1580), &Line::new("143", false), mid_month());

        assert!(result.is_err());
        assert_eq!(policy.trips_this_period(), 0);
    }

    #[test]
    fn test_reset_on_first_of_month() {
        let mut policy = FrequentRider { trips_this_period: 45 };
        let mut account = account(5000);
        let first = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();

        policy.pay(&mut account, Money::from_major(1580), &Line::new("143", false), first).unwrap();

        assert_eq!(account.balance(), Money::from_major(3420));
        assert_eq!(policy.trips_this_period(), 1);
    }

    #[test]
    fn test_no_reset_on_other_days() {
        let mut policy = FrequentRider { trips_this_period: 45 };
        let mut account = account(5000);

        policy
            .pay(&mut account, Money::from_major(1580), &Line::new("143", false), mid_month() + Duration::days(1))
            .unwrap();

        assert_eq!(policy.trips_this_period(), 46);
        assert!(account
            .events
            .events()
            .iter()
            .any(|e| matches!(e, Event::DiscountApplied { .. })));
    }
}
