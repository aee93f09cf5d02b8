/// serialization support for cards and receipts
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::CardAccount;
use crate::decimal::{Money, Rate};
use crate::receipt::TripReceipt;
use crate::types::{CardId, CardKind};

/// serializable view of a card's state
#[derive(Debug, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub kind: CardKind,
    pub kind_label: String,
    pub balances: BalanceView,
    pub last_trip: Option<LastTripView>,
    pub policy: PolicyView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceView {
    pub balance: Money,
    pub pending_balance: Money,
    pub available_funds: Money,
    pub max_balance: Money,
    pub negative_floor: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LastTripView {
    pub at: DateTime<Utc>,
    pub route_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PolicyView {
    pub trips_today: Option<u32>,
    pub trips_this_period: Option<u32>,
    pub discount_factor: Rate,
}

impl CardView {
    pub fn from_account(account: &CardAccount, policy: PolicyView) -> Self {
        let last_trip = match (account.last_trip_at(), account.last_trip_line()) {
            (Some(at), Some(route_id)) => Some(LastTripView {
                at,
                route_id: route_id.to_string(),
            }),
            _ => None,
        };

        CardView {
            id: account.id().to_string(),
            kind: account.kind(),
            kind_label: account.kind_label().to_string(),
            balances: BalanceView {
                balance: account.balance(),
                pending_balance: account.pending_balance(),
                available_funds: account.available_funds(),
                max_balance: account.config().limits.max_balance,
                negative_floor: account.config().limits.negative_floor,
            },
            last_trip,
            policy,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// receipt view
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptView {
    pub route_id: String,
    pub remaining_balance: Money,
    pub issued_at: DateTime<Utc>,
    pub card_kind: String,
    pub card_id: CardId,
    pub amount_charged: Money,
}

impl ReceiptView {
    pub fn from_receipt(receipt: &TripReceipt) -> Self {
        ReceiptView {
            route_id: receipt.route_id().to_string(),
            remaining_balance: receipt.remaining_balance(),
            issued_at: receipt.issued_at(),
            card_kind: receipt.card_kind().to_string(),
            card_id: receipt.card_id().to_string(),
            amount_charged: receipt.amount_charged(),
        }
    }
}
