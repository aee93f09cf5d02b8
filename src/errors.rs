use thiserror::Error;

use crate::decimal::Money;
use crate::types::CardKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FareError {
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        available: Money,
        requested: Money,
    },

    #[error("card used too recently: wait {remaining_seconds}s before the next discounted trip")]
    CooldownActive {
        remaining_seconds: i64,
    },

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid top-up option {option}: choose between 1 and {available}")]
    InvalidTopUpOption {
        option: usize,
        available: usize,
    },

    #[error("card kind label is fixed for {kind:?} cards")]
    KindLabelLocked {
        kind: CardKind,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl FareError {
    /// short machine-readable reason, used in rejection events
    pub fn reason(&self) -> &'static str {
        match self {
            FareError::InsufficientFunds { .. } => "insufficient_funds",
            FareError::CooldownActive { .. } => "cooldown_active",
            FareError::InvalidAmount { .. } => "invalid_amount",
            FareError::InvalidTopUpOption { .. } => "invalid_top_up_option",
            FareError::KindLabelLocked { .. } => "kind_label_locked",
            FareError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, FareError>;
