use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{CardId, CardKind};

/// all events that can be emitted by a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    CardIssued {
        card_id: CardId,
        kind: CardKind,
    },

    // balance events
    ToppedUp {
        card_id: CardId,
        credited: Money,
        deferred: Money,
        timestamp: DateTime<Utc>,
    },
    PendingCredited {
        card_id: CardId,
        amount: Money,
        remaining_pending: Money,
    },

    // trip events
    TripCharged {
        card_id: CardId,
        route_id: String,
        amount: Money,
        balance: Money,
        timestamp: DateTime<Utc>,
    },
    TransferApplied {
        card_id: CardId,
        from_route: String,
        to_route: String,
        timestamp: DateTime<Utc>,
    },
    DiscountApplied {
        card_id: CardId,
        policy: CardKind,
        /// position of the trip in the benefit period, `None` when the benefit is uncounted
        trip_number: Option<u32>,
        nominal: Money,
        charged: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentRejected {
        card_id: CardId,
        route_id: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
