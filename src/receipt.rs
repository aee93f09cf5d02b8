use chrono::{DateTime, Utc};
use std::fmt;

use crate::account::CardAccount;
use crate::decimal::Money;
use crate::serialization::ReceiptView;
use crate::types::CardId;

/// ticket issued for a paid trip, frozen at issue time
#[derive(Debug, Clone, PartialEq)]
pub struct TripReceipt {
    route_id: String,
    remaining_balance: Money,
    issued_at: DateTime<Utc>,
    card_kind: String,
    card_id: CardId,
    amount_charged: Money,
}

impl TripReceipt {
    /// snapshot the card as it is right now
    pub fn new(route_id: impl Into<String>, card: &CardAccount, issued_at: DateTime<Utc>) -> Self {
        Self {
            route_id: route_id.into(),
            remaining_balance: card.balance(),
            issued_at,
            card_kind: card.kind_label().to_string(),
            card_id: card.id().to_string(),
            amount_charged: Money::ZERO,
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn remaining_balance(&self) -> Money {
        self.remaining_balance
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn card_kind(&self) -> &str {
        &self.card_kind
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn amount_charged(&self) -> Money {
        self.amount_charged
    }

    /// audit field, the only one that may change after issue
    pub fn set_amount_charged(&mut self, amount: Money) {
        self.amount_charged = amount;
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&ReceiptView::from_receipt(self))
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

impl fmt::Display for TripReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ticket issued for line: {}", self.route_id)?;
        writeln!(f, "Remaining balance: {:.2}", self.remaining_balance.as_decimal())?;
        writeln!(f, "Issued at: {}", self.issued_at.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Card type: {}", self.card_kind)?;
        write!(f, "Card id: {}", self.card_id)
    }
}
