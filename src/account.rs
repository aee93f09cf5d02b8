use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::FareConfig;
use crate::decimal::Money;
use crate::errors::{FareError, Result};
use crate::events::{Event, EventStore};
use crate::line::Line;
use crate::types::{CardId, CardKind, Payment, TopUp};

/// balance and trip state shared by every card kind
#[derive(Debug)]
pub struct CardAccount {
    pub(crate) id: CardId,
    pub(crate) kind: CardKind,
    pub(crate) kind_label: String,
    pub(crate) balance: Money,
    pub(crate) pending_balance: Money,
    pub(crate) last_trip_at: Option<DateTime<Utc>>,
    pub(crate) last_trip_line: Option<String>,
    pub(crate) config: FareConfig,
    pub events: EventStore,
}

impl CardAccount {
    /// create a new account with a fresh id and zero balance
    pub fn new(kind: CardKind, config: FareConfig) -> Self {
        Self::with_id(generate_card_id(), kind, config)
    }

    pub fn with_id(id: CardId, kind: CardKind, config: FareConfig) -> Self {
        let mut events = EventStore::new();
        events.emit(Event::CardIssued {
            card_id: id.clone(),
            kind,
        });

        Self {
            id,
            kind,
            kind_label: kind.label().to_string(),
            balance: Money::ZERO,
            pending_balance: Money::ZERO,
            last_trip_at: None,
            last_trip_line: None,
            config,
            events,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn kind_label(&self) -> &str {
        &self.kind_label
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn pending_balance(&self) -> Money {
        self.pending_balance
    }

    pub fn last_trip_at(&self) -> Option<DateTime<Utc>> {
        self.last_trip_at
    }

    pub fn last_trip_line(&self) -> Option<&str> {
        self.last_trip_line.as_deref()
    }

    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    /// room left under the balance ceiling
    pub fn headroom(&self) -> Money {
        (self.config.limits.max_balance - self.balance).max(Money::ZERO)
    }

    /// most that can be spent right now, including the credit line
    pub fn available_funds(&self) -> Money {
        self.balance + self.config.limits.negative_floor
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        self.available_funds() >= amount
    }

    /// whether a trip on `line` at `now` rides free as a transfer
    pub fn is_transfer(&self, line: &Line, now: DateTime<Utc>) -> bool {
        let rules = &self.config.transfer;

        let (Some(last_at), Some(last_line)) = (self.last_trip_at, self.last_trip_line.as_deref())
        else {
            return false;
        };

        now - last_at < Duration::minutes(rules.window_minutes)
            && (rules.allowed_on_sunday || now.weekday() != Weekday::Sun)
            && rules.hours.contains(now.hour())
            && last_line != line.route_id()
    }

    /// whether the last trip happened on the same calendar day as `now`
    pub fn rode_today(&self, now: DateTime<Utc>) -> bool {
        self.last_trip_at
            .map(|at| at.date_naive() == now.date_naive())
            .unwrap_or(false)
    }

    /// time since the last trip, `None` if the card never rode
    pub fn since_last_trip(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_trip_at.map(|at| now - at)
    }

    /// debit a trip, applying transfer rules; no state changes on failure
    pub fn settle_trip(&mut self, amount: Money, line: &Line, now: DateTime<Utc>) -> Result<Payment> {
        let transfer = self.is_transfer(line, now);

        if !self.can_afford(amount) {
            return Err(FareError::InsufficientFunds {
                available: self.available_funds(),
                requested: amount,
            });
        }

        let charged = if transfer {
            let from_route = self.last_trip_line.clone().unwrap_or_default();
            info!(card_id = %self.id, from = %from_route, to = %line.route_id(), "free transfer");
            self.events.emit(Event::TransferApplied {
                card_id: self.id.clone(),
                from_route,
                to_route: line.route_id().to_string(),
                timestamp: now,
            });
            Money::ZERO
        } else {
            self.balance -= amount;
            amount
        };

        self.last_trip_at = Some(now);
        self.last_trip_line = Some(line.route_id().to_string());

        self.events.emit(Event::TripCharged {
            card_id: self.id.clone(),
            route_id: line.route_id().to_string(),
            amount: charged,
            balance: self.balance,
            timestamp: now,
        });
        info!(card_id = %self.id, route = %line.route_id(), charged = %charged, balance = %self.balance, "trip paid");

        self.credit_pending();

        Ok(Payment {
            charged,
            requested: amount,
            transfer,
            at: now,
        })
    }

    /// add funds, parking whatever exceeds the ceiling in pending balance
    pub fn top_up(&mut self, amount: Money, now: DateTime<Utc>) -> Result<TopUp> {
        if !amount.is_positive() {
            return Err(FareError::InvalidAmount { amount });
        }

        let room = self.headroom();
        let result = if amount <= room {
            self.balance += amount;
            TopUp {
                credited: amount,
                deferred: Money::ZERO,
            }
        } else {
            let excess = amount - room;
            self.balance += room;
            self.pending_balance += excess;
            TopUp {
                credited: room,
                deferred: excess,
            }
        };

        self.events.emit(Event::ToppedUp {
            card_id: self.id.clone(),
            credited: result.credited,
            deferred: result.deferred,
            timestamp: now,
        });
        info!(
            card_id = %self.id,
            credited = %result.credited,
            deferred = %result.deferred,
            pending = %self.pending_balance,
            "top-up applied"
        );

        Ok(result)
    }

    /// move pending balance into the balance up to the ceiling, returns the amount moved
    pub fn credit_pending(&mut self) -> Money {
        if !self.pending_balance.is_positive() {
            return Money::ZERO;
        }

        let room = self.headroom();
        if !room.is_positive() {
            return Money::ZERO;
        }

        let amount = self.pending_balance.min(room);
        self.balance += amount;
        self.pending_balance -= amount;

        self.events.emit(Event::PendingCredited {
            card_id: self.id.clone(),
            amount,
            remaining_pending: self.pending_balance,
        });
        debug!(card_id = %self.id, amount = %amount, remaining = %self.pending_balance, "pending balance credited");

        amount
    }
}

/// random card id, unique for the process lifetime
pub fn generate_card_id() -> CardId {
    format!("CARD-{}", Uuid::new_v4())
}
