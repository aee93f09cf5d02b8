use chrono::{DateTime, Utc};
use tracing::debug;

use crate::account::CardAccount;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::Event;
use crate::line::Line;
use crate::types::{CardKind, Payment};

use super::in_franchise_hours;

/// rides free inside the franchise window, full fare outside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullFranchise;

impl FullFranchise {
    pub fn pay(
        &mut self,
        account: &mut CardAccount,
        fare: Money,
        line: &Line,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        if !in_franchise_hours(account, now) {
            debug!(card_id = %account.id(), "full franchise inactive at this hour, charging full fare");
            return account.settle_trip(fare, line, now);
        }

        let payment = account.settle_trip(Money::ZERO, line, now)?;

        account.events.emit(Event::DiscountApplied {
            card_id: account.id().to_string(),
            policy: CardKind::FullFranchise,
            trip_number: None,
            nominal: fare,
            charged: payment.charged,
            timestamp: now,
        });

        Ok(payment)
    }
}
