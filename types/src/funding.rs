//! Funding quantities.
//!
//! Amounts are fixed-point integers (u128) in raw units. One whole unit is
//! [`ONE_UNIT`] raw, mirroring an 18-decimal token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SuretyError;

/// Raw units per whole unit.
pub const ONE_UNIT: u128 = 1_000_000_000_000_000_000;

/// A non-negative funding quantity deposited by an actor.
///
/// Serialized as a decimal string: TOML integers stop at `i64`, which is
/// smaller than ten whole units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FundAmount(u128);

impl FundAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole units, converted to raw.
    pub const fn units(units: u128) -> Self {
        Self(units * ONE_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for FundAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

impl FromStr for FundAmount {
    type Err = SuretyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .replace('_', "")
            .parse::<u128>()
            .map(Self)
            .map_err(|e| SuretyError::InvalidAmount(format!("{s}: {e}")))
    }
}

impl TryFrom<String> for FundAmount {
    type Error = SuretyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FundAmount> for String {
    fn from(amount: FundAmount) -> Self {
        amount.0.to_string()
    }
}
