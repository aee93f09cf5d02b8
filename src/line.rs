use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::card::FareCard;
use crate::config::FareConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::receipt::TripReceipt;

/// a bus route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    route_id: String,
    long_distance: bool,
}

impl Line {
    pub fn new(route_id: impl Into<String>, long_distance: bool) -> Self {
        Self {
            route_id: route_id.into(),
            long_distance,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn is_long_distance(&self) -> bool {
        self.long_distance
    }

    /// nominal fare before any card policy
    pub fn fare(&self, config: &FareConfig) -> Money {
        if self.long_distance {
            config.fares.long_distance
        } else {
            config.fares.standard
        }
    }

    /// charge the card for a ride and issue a receipt
    pub fn pay_with(&self, card: &mut FareCard<'_>) -> Result<TripReceipt> {
        let fare = self.fare(card.config());

        let payment = card.try_pay(fare, self).map_err(|e| {
            warn!(route = %self.route_id, card_id = %card.id(), error = %e, "no receipt issued");
            e
        })?;

        let mut receipt = TripReceipt::new(self.route_id.clone(), card.account(), payment.at);
        receipt.set_amount_charged(payment.charged);
        Ok(receipt)
    }

    /// boolean form of `pay_with`
    pub fn pay_with_flag(&self, card: &mut FareCard<'_>) -> (bool, Option<TripReceipt>) {
        match self.pay_with(card) {
            Ok(receipt) => (true, Some(receipt)),
            Err(_) => (false, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FareCardBuilder;
    use crate::errors::FareError;
    use crate::policies::FarePolicy;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap()
        ))
    }

    #[test]
    fn test_line_accessors() {
        let line = Line::new("Linea 123", false);
        assert_eq!(line.route_id(), "Linea 123");
        assert!(!line.is_long_distance());
    }

    #[test]
    fn test_fares_by_line_type() {
        let config = FareConfig::standard();
        assert_eq!(Line::new("143", false).fare(&config), Money::from_major(1580));
        assert_eq!(Line::new("500", true).fare(&config), Money::from_major(3000));
    }

    #[test]
    fn test_pay_with_standard_line() {
        let time = test_time();
        let mut card = FareCardBuilder::new()
            .policy(FarePolicy::unrestricted())
            .balance(Money::from_major(2000))
            .set_time(&time)
            .build()
            .unwrap();

        let receipt = Line::new("Linea 123", false).pay_with(&mut card).unwrap();

        assert_eq!(receipt.route_id(), "Linea 123");
        assert_eq!(receipt.remaining_balance(), Money::from_major(420));
        assert_eq!(receipt.amount_charged(), Money::from_major(1580));
        assert_eq!(receipt.issued_at(), time.now());
        assert_eq!(receipt.card_id(), card.id());
        assert_eq!(card.balance(), Money::from_major(420));
    }

    #[test]
    fn test_pay_with_long_distance_line() {
        let time = test_time();
        let mut card = FareCardBuilder::new()
            .policy(FarePolicy::unrestricted())
            .balance(Money::from_major(4000))
            .set_time(&time)
            .build()
            .unwrap();

        let receipt = Line::new("Linea 500", true).pay_with(&mut card).unwrap();

        assert_eq!(receipt.route_id(), "Linea 500");
        assert_eq!(card.balance(), Money::from_major(1000));
    }

    #[test]
    fn test_pay_with_insufficient_balance_issues_no_receipt() {
        let time = test_time();
        let mut card = FareCardBuilder::new()
            .policy(FarePolicy::unrestricted())
            .balance(Money::from_major(100))
            .set_time(&time)
            .build()
            .unwrap();

        let result = Line::new("Linea 123", false).pay_with(&mut card);

        assert!(matches!(result, Err(FareError::InsufficientFunds { .. })));
        assert_eq!(card.balance(), Money::from_major(100));

        let (paid, receipt) = Line::new("Linea 123", false).pay_with_flag(&mut card);
        assert!(!paid);
        assert!(receipt.is_none());
    }

    #[test]
    fn test_receipt_is_a_snapshot() {
        let time = test_time();
        let control = time.test_control().unwrap();
        let mut card = FareCardBuilder::new()
            .policy(FarePolicy::unrestricted())
            .balance(Money::from_major(5000))
            .set_time(&time)
            .build()
            .unwrap();

        let line = Line::new("143", false);
        let first = line.pay_with(&mut card).unwrap();

        control.advance(chrono::Duration::hours(2));
        line.pay_with(&mut card).unwrap();

        assert_eq!(first.remaining_balance(), Money::from_major(3420));
        assert_eq!(card.balance(), Money::from_major(1840));
    }
}
