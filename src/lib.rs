pub mod account;
pub mod card;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod line;
pub mod policies;
pub mod receipt;
pub mod serialization;
pub mod types;

// re-export key types
pub use account::CardAccount;
pub use card::{FareCard, FareCardBuilder};
pub use config::{BalanceLimits, BenefitRules, FareConfig, FareTable, FrequencyTier, HourWindow, TransferRules};
pub use decimal::{Money, Rate};
pub use errors::{FareError, Result};
pub use events::{Event, EventStore};
pub use line::Line;
pub use policies::{FarePolicy, FreeStudent, FrequentRider, FullFranchise, HalfFareStudent};
pub use receipt::TripReceipt;
pub use types::{CardId, CardKind, Payment, TopUp};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
