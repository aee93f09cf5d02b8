use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{FareError, Result};

/// tariff configuration shared by cards and lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareConfig {
    pub limits: BalanceLimits,
    pub fares: FareTable,
    pub transfer: TransferRules,
    pub benefits: BenefitRules,
    pub frequency_tiers: Vec<FrequencyTier>,
    pub top_up_amounts: Vec<Money>,
}

/// balance ceiling and credit line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceLimits {
    pub max_balance: Money,
    /// how far below zero a balance may go
    pub negative_floor: Money,
}

/// nominal fares per line type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareTable {
    pub standard: Money,
    pub long_distance: Money,
}

/// free transfer conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferRules {
    pub window_minutes: i64,
    pub hours: HourWindow,
    pub allowed_on_sunday: bool,
}

/// franchise and student benefit rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenefitRules {
    pub franchise_hours: HourWindow,
    pub student_cooldown_minutes: i64,
    pub daily_benefit_trips: u32,
    pub half_fare_ratio: Rate,
}

/// hour-of-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
    /// whether the whole `end` hour is still inside the window
    pub inclusive_end: bool,
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        if self.inclusive_end {
            hour >= self.start && hour <= self.end
        } else {
            hour >= self.start && hour < self.end
        }
    }
}

/// frequent-use discount band, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTier {
    pub min_trips: u32,
    pub max_trips: u32,
    pub factor: Rate,
}

impl FareConfig {
    /// default tariff
    pub fn standard() -> Self {
        Self {
            limits: BalanceLimits {
                max_balance: Money::from_major(56_000),
                negative_floor: Money::from_major(1_200),
            },
            fares: FareTable {
                standard: Money::from_major(1_580),
                long_distance: Money::from_major(3_000),
            },
            transfer: TransferRules {
                window_minutes: 60,
                hours: HourWindow { start: 7, end: 22, inclusive_end: false },
                allowed_on_sunday: false,
            },
            benefits: BenefitRules {
                franchise_hours: HourWindow { start: 6, end: 22, inclusive_end: true },
                student_cooldown_minutes: 5,
                daily_benefit_trips: 2,
                half_fare_ratio: Rate::from_decimal(dec!(0.5)),
            },
            frequency_tiers: vec![
                FrequencyTier { min_trips: 30, max_trips: 59, factor: Rate::from_percentage(80) },
                FrequencyTier { min_trips: 60, max_trips: 80, factor: Rate::from_percentage(75) },
            ],
            top_up_amounts: [2_000, 3_000, 4_000, 5_000, 10_000, 15_000, 20_000, 25_000, 30_000]
                .into_iter()
                .map(Money::from_major)
                .collect(),
        }
    }

    /// discount factor for a trip count; counts outside every tier pay full fare
    pub fn frequency_factor(&self, trips: u32) -> Rate {
        self.frequency_tiers
            .iter()
            .find(|tier| trips >= tier.min_trips && trips <= tier.max_trips)
            .map(|tier| tier.factor)
            .unwrap_or(Rate::ONE)
    }

    /// check internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.limits.max_balance.is_positive() {
            return Err(invalid("max balance must be positive"));
        }
        if self.limits.negative_floor.is_negative() {
            return Err(invalid("negative floor cannot be below zero"));
        }
        if self.fares.standard.is_negative() || self.fares.long_distance.is_negative() {
            return Err(invalid("fares cannot be negative"));
        }
        if self.transfer.window_minutes < 0 || self.benefits.student_cooldown_minutes < 0 {
            return Err(invalid("time windows cannot be negative"));
        }
        for window in [self.transfer.hours, self.benefits.franchise_hours] {
            if window.start > 23 || window.end > 24 || window.start > window.end {
                return Err(invalid("hour window out of range"));
            }
        }
        let ratio = self.benefits.half_fare_ratio;
        if ratio < Rate::ZERO || ratio > Rate::ONE {
            return Err(invalid("half fare ratio must be between 0 and 1"));
        }
        for tier in &self.frequency_tiers {
            if tier.min_trips > tier.max_trips {
                return Err(invalid("frequency tier bounds are reversed"));
            }
            if tier.factor < Rate::ZERO {
                return Err(invalid("frequency factor cannot be negative"));
            }
        }
        if self.top_up_amounts.iter().any(|amount| !amount.is_positive()) {
            return Err(invalid("top-up amounts must be positive"));
        }
        Ok(())
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid(message: &str) -> FareError {
    FareError::InvalidConfiguration {
        message: message.to_string(),
    }
}
