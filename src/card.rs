use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use tracing::warn;

use crate::account::{generate_card_id, CardAccount};
use crate::config::FareConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{FareError, Result};
use crate::events::Event;
use crate::line::Line;
use crate::policies::FarePolicy;
use crate::serialization::CardView;
use crate::types::{CardKind, Payment, TopUp};

/// smart card bound to a clock
pub struct FareCard<'t> {
    account: CardAccount,
    policy: FarePolicy,
    time: &'t SafeTimeProvider,
}

impl<'t> FareCard<'t> {
    /// create a card with zero balance
    pub fn new(policy: FarePolicy, config: FareConfig, time: &'t SafeTimeProvider) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            account: CardAccount::new(policy.kind(), config),
            policy,
            time,
        })
    }

    /// pay a trip, `true` if the ride was accepted
    pub fn pay(&mut self, amount: Money, line: &Line) -> bool {
        self.try_pay(amount, line).is_ok()
    }

    /// pay a trip at the clock's current time
    pub fn try_pay(&mut self, amount: Money, line: &Line) -> Result<Payment> {
        let now = self.time.now();
        self.try_pay_at(amount, line, now)
    }

    /// pay a trip at an explicit time
    pub fn try_pay_at(&mut self, amount: Money, line: &Line, now: DateTime<Utc>) -> Result<Payment> {
        let result = self.policy.pay(&mut self.account, amount, line, now);

        if let Err(e) = &result {
            warn!(card_id = %self.account.id(), route = %line.route_id(), error = %e, "trip rejected");
            self.account.events.emit(Event::PaymentRejected {
                card_id: self.account.id().to_string(),
                route_id: line.route_id().to_string(),
                reason: e.reason().to_string(),
                timestamp: now,
            });
        }

        result
    }

    /// load an arbitrary amount
    pub fn top_up(&mut self, amount: Money) -> Result<TopUp> {
        let now = self.time.now();
        self.account.top_up(amount, now)
    }

    /// load one of the preset amounts, `option` counts from 1
    pub fn top_up_option(&mut self, option: usize) -> Result<TopUp> {
        let amounts = &self.account.config().top_up_amounts;
        let amount = option
            .checked_sub(1)
            .and_then(|index| amounts.get(index))
            .copied()
            .ok_or(FareError::InvalidTopUpOption {
                option,
                available: amounts.len(),
            })?;
        self.top_up(amount)
    }

    /// move pending balance onto the card as far as the ceiling allows
    pub fn credit_pending(&mut self) -> Money {
        self.account.credit_pending()
    }

    /// rename the card type, only allowed on cards without a franchise
    pub fn set_kind_label(&mut self, label: impl Into<String>) -> Result<()> {
        let kind = self.account.kind();
        if !kind.label_is_mutable() {
            return Err(FareError::KindLabelLocked { kind });
        }
        self.account.kind_label = label.into();
        Ok(())
    }

    pub fn id(&self) -> &str {
        self.account.id()
    }

    pub fn kind(&self) -> CardKind {
        self.account.kind()
    }

    pub fn kind_label(&self) -> &str {
        self.account.kind_label()
    }

    pub fn balance(&self) -> Money {
        self.account.balance()
    }

    pub fn pending_balance(&self) -> Money {
        self.account.pending_balance()
    }

    pub fn last_trip_at(&self) -> Option<DateTime<Utc>> {
        self.account.last_trip_at()
    }

    pub fn last_trip_line(&self) -> Option<&str> {
        self.account.last_trip_line()
    }

    pub fn config(&self) -> &FareConfig {
        self.account.config()
    }

    /// current frequent-use discount factor
    pub fn discount_factor(&self) -> Rate {
        self.policy.discount_factor(&self.account)
    }

    pub fn account(&self) -> &CardAccount {
        &self.account
    }

    pub fn policy(&self) -> &FarePolicy {
        &self.policy
    }

    pub fn events(&self) -> &[Event] {
        self.account.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.account.events.take_events()
    }

    /// get json representation of current state
    pub fn to_json_pretty(&self) -> String {
        let view = CardView::from_account(&self.account, self.policy.view(&self.account));
        view.to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

/// builder for fare cards
pub struct FareCardBuilder<'t> {
    policy: Option<FarePolicy>,
    config: Option<FareConfig>,
    id: Option<String>,
    balance: Option<Money>,
    kind_label: Option<String>,
    time_provider: Option<&'t SafeTimeProvider>,
}

impl<'t> FareCardBuilder<'t> {
    pub fn new() -> Self {
        Self {
            policy: None,
            config: None,
            id: None,
            balance: None,
            kind_label: None,
            time_provider: None,
        }
    }

    pub fn set_time(mut self, time: &'t SafeTimeProvider) -> Self {
        self.time_provider = Some(time);
        self
    }

    pub fn policy(mut self, policy: FarePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn config(mut self, config: FareConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// opening balance, may sit anywhere between the floor and the ceiling
    pub fn balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn kind_label(mut self, label: impl Into<String>) -> Self {
        self.kind_label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<FareCard<'t>> {
        let time = self.time_provider.ok_or(FareError::InvalidConfiguration {
            message: "Time provider not set. Call set_time() first".to_string(),
        })?;

        let config = self.config.unwrap_or_default();
        config.validate()?;

        let policy = self.policy.unwrap_or_else(FarePolicy::frequent_rider);
        let id = self.id.unwrap_or_else(generate_card_id);
        let mut account = CardAccount::with_id(id, policy.kind(), config);

        if let Some(balance) = self.balance {
            let limits = account.config().limits;
            if balance > limits.max_balance || balance < -limits.negative_floor {
                return Err(FareError::InvalidConfiguration {
                    message: format!("opening balance {} outside card limits", balance),
                });
            }
            account.balance = balance;
        }

        let mut card = FareCard {
            account,
            policy,
            time,
        };

        if let Some(label) = self.kind_label {
            card.set_kind_label(label)?;
        }

        Ok(card)
    }
}

impl<'t> Default for FareCardBuilder<'t> {
    fn default() -> Self {
        Self::new()
    }
}
