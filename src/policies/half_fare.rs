use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::account::CardAccount;
use crate::decimal::Money;
use crate::errors::{FareError, Result};
use crate::events::Event;
use crate::line::Line;
use crate::types::{CardKind, Payment};

use super::in_franchise_hours;

/// student card paying half fare for the first trips of each day
///
/// Inside the franchise window the card refuses to ride again until the
/// cooldown since the previous trip has elapsed. The day counter is bumped
/// before settling and rolled back when settling fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HalfFareStudent {
    trips_today: u32,
}

impl HalfFareStudent {
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
            debug!(card_id = %account.id(), "half fare inactive at this hour, charging full fare");
            return account.settle_trip(fare, line, now);
        }

        let cooldown = Duration::minutes(account.config().benefits.student_cooldown_minutes);
        if let Some(elapsed) = account.since_last_trip(now) {
            if elapsed < cooldown {
                return Err(FareError::CooldownActive {
                    remaining_seconds: (cooldown - elapsed).num_seconds(),
                });
            }
        }

        if !account.rode_today(now) {
            self.trips_today = 0;
        }

        let benefits = account.config().benefits;
        let discounted = self.trips_today < benefits.daily_benefit_trips;
        let amount = if discounted {
            self.trips_today += 1;
            fare.scale(benefits.half_fare_ratio)
        } else {
            info!(card_id = %account.id(), "daily half fares used up, charging full fare");
            fare
        };

        match account.settle_trip(amount, line, now) {
            Ok(payment) => {
                if discounted {
                    account.events.emit(Event::DiscountApplied {
                        card_id: account.id().to_string(),
                        policy: CardKind::HalfFareStudent,
                        trip_number: Some(self.trips_today),
                        nominal: fare,
                        charged: payment.charged,
                        timestamp: now,
                    });
                }
                Ok(payment)
            }
            Err(e) => {
                if discounted {
                    self.trips_today -= 1;
                }
                Err(e)
            }
        }
    }
}
