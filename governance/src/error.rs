use surety_types::SuretyError;
use thiserror::Error;

/// Rejections raised by the governance core.
///
/// Every variant is reported before any state is touched; a failed call
/// leaves the registry, ledger, tallies and flags exactly as they were.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("operations are paused: the operational gate is closed")]
    NotOperational,

    #[error("caller {0} is not the administrator")]
    Unauthorized(String),

    #[error("{0} is not a registered and funded airline")]
    SponsorNotEligible(String),

    #[error("airline {0} is already registered")]
    AlreadyRegistered(String),

    #[error("airline {voter} has already voted for {candidate}")]
    DuplicateVote { voter: String, candidate: String },

    #[error("{0} is not awaiting consensus")]
    UnknownCandidate(String),

    #[error("funding amount must be non-zero")]
    ZeroAmount,

    #[error("funding total for {0} would overflow")]
    FundingOverflow(String),

    #[error("invalid registry parameters: {0}")]
    InvalidParams(String),

    #[error("governance state lock was poisoned")]
    LockPoisoned,
}

impl From<SuretyError> for GovernanceError {
    fn from(e: SuretyError) -> Self {
        match e {
            SuretyError::InvalidParams(msg) => Self::InvalidParams(msg),
            other => Self::InvalidParams(other.to_string()),
        }
    }
}
