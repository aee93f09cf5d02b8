pub mod free_student;
pub mod frequent_rider;
pub mod full_franchise;
pub mod half_fare;

use chrono::{DateTime, Timelike, Utc};

use crate::account::CardAccount;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::line::Line;
use crate::serialization::PolicyView;
use crate::types::{CardKind, Payment};

pub use free_student::FreeStudent;
pub use frequent_rider::FrequentRider;
pub use full_franchise::FullFranchise;
pub use half_fare::HalfFareStudent;

/// fare policy attached to a card at issue
///
/// Every variant turns the nominal fare into the amount it asks for and then
/// settles the trip through [`CardAccount::settle_trip`] at most once, so
/// transfer and balance-floor rules apply on top of the variant's discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarePolicy {
    Unrestricted,
    FrequentRider(FrequentRider),
    FullFranchise(FullFranchise),
    HalfFareStudent(HalfFareStudent),
    FreeStudent(FreeStudent),
}

impl FarePolicy {
    pub fn unrestricted() -> Self {
        FarePolicy::Unrestricted
    }

    pub fn frequent_rider() -> Self {
        FarePolicy::FrequentRider(FrequentRider::new())
    }

    pub fn full_franchise() -> Self {
        FarePolicy::FullFranchise(FullFranchise)
    }

    pub fn half_fare_student() -> Self {
        FarePolicy::HalfFareStudent(HalfFareStudent::new())
    }

    pub fn free_student() -> Self {
        FarePolicy::FreeStudent(FreeStudent::new())
    }

    pub fn kind(&self) -> CardKind {
        match self {
            FarePolicy::Unrestricted => CardKind::Unrestricted,
            FarePolicy::FrequentRider(_) => CardKind::FrequentRider,
            FarePolicy::FullFranchise(_) => CardKind::FullFranchise,
            FarePolicy::HalfFareStudent(_) => CardKind::HalfFareStudent,
            FarePolicy::FreeStudent(_) => CardKind::FreeStudent,
        }
    }

    /// pay a trip under this policy
    pub fn pay(
        &mut self,
        account: &mut CardAccount,
        fare: Money,
        line: &Line,
        now: DateTime<Utc>,
    ) -> Result<Payment> {
        match self {
            FarePolicy::Unrestricted => account.settle_trip(fare, line, now),
            FarePolicy::FrequentRider(policy) => policy.pay(account, fare, line, now),
            FarePolicy::FullFranchise(policy) => policy.pay(account, fare, line, now),
            FarePolicy::HalfFareStudent(policy) => policy.pay(account, fare, line, now),
            FarePolicy::FreeStudent(policy) => policy.pay(account, fare, line, now),
        }
    }

    /// current frequent-use factor, 1 for every other policy
    pub fn discount_factor(&self, account: &CardAccount) -> Rate {
        match self {
            FarePolicy::FrequentRider(policy) => policy.discount_factor(account.config()),
            _ => Rate::ONE,
        }
    }

    pub fn view(&self, account: &CardAccount) -> PolicyView {
        let (trips_today, trips_this_period) = match self {
            FarePolicy::FrequentRider(policy) => (None, Some(policy.trips_this_period())),
            FarePolicy::HalfFareStudent(policy) => (Some(policy.trips_today()), None),
            FarePolicy::FreeStudent(policy) => (Some(policy.trips_today()), None),
            _ => (None, None),
        };

        PolicyView {
            trips_today,
            trips_this_period,
            discount_factor: self.discount_factor(account),
        }
    }
}

/// whether franchise benefits apply at `now`
pub(crate) fn in_franchise_hours(account: &CardAccount, now: DateTime<Utc>) -> bool {
    account.config().benefits.franchise_hours.contains(now.hour())
}
