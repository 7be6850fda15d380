//! Registry parameters — the configuration constants of the governance core.

use crate::error::SuretyError;
use crate::funding::FundAmount;
use serde::{Deserialize, Serialize};

/// Configuration constants fixed at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Registered-airline count at which admission switches from unilateral
    /// sponsorship to multiparty consensus. While fewer than this many
    /// airlines are registered, a single eligible sponsor admits directly.
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: u32,

    /// Minimum accumulated funding (raw) before an airline may sponsor or vote.
    /// Default: 10 whole units.
    #[serde(default = "default_min_funding")]
    pub min_funding: FundAmount,
}

fn default_consensus_threshold() -> u32 {
    4
}

fn default_min_funding() -> FundAmount {
    FundAmount::units(10)
}

impl RegistryParams {
    /// Reject parameter sets that would make the registry unusable.
    pub fn validate(&self) -> Result<(), SuretyError> {
        if self.consensus_threshold == 0 {
            return Err(SuretyError::InvalidParams(
                "consensus_threshold must be at least 1".into(),
            ));
        }
        if self.min_funding.is_zero() {
            return Err(SuretyError::InvalidParams(
                "min_funding must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Votes needed to promote a pending candidate when `registered` airlines
    /// are currently registered: a strict majority.
    pub fn required_votes(registered: u32) -> u32 {
        registered / 2 + 1
    }
}

impl Default for RegistryParams {
    fn default() -> Self {
        Self {
            consensus_threshold: default_consensus_threshold(),
            min_funding: default_min_funding(),
        }
    }
}
