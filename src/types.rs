use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// unique identifier for a card
pub type CardId = String;

/// card kinds, one per fare policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// plain card, no discounts of any kind
    Unrestricted,
    /// standard card with frequent-use discounts
    FrequentRider,
    /// always free inside the franchise window
    FullFranchise,
    /// half fare for the first trips of the day
    HalfFareStudent,
    /// free for the first trips of the day
    FreeStudent,
}

impl CardKind {
    /// default human-readable label printed on receipts
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Unrestricted | CardKind::FrequentRider => "No Franchise",
            CardKind::FullFranchise => "Full Franchise",
            CardKind::HalfFareStudent => "Half Fare Student",
            CardKind::FreeStudent => "Free Student",
        }
    }

    /// whether the label may be reassigned after issue
    pub fn label_is_mutable(&self) -> bool {
        matches!(self, CardKind::Unrestricted | CardKind::FrequentRider)
    }
}

/// outcome of a settled trip payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// amount actually debited from the balance
    pub charged: Money,
    /// amount requested after policy discounts
    pub requested: Money,
    pub transfer: bool,
    pub at: DateTime<Utc>,
}

/// outcome of a top-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TopUp {
    /// amount added to the balance right away
    pub credited: Money,
    /// amount parked in pending balance because of the ceiling
    pub deferred: Money,
}

impl TopUp {
    pub fn total(&self) -> Money {
        self.credited + self.deferred
    }
}
