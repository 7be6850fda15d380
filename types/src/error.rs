//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing shared types.
#[derive(Debug, Error)]
pub enum SuretyError {
    #[error("invalid actor identity: {0}")]
    InvalidActor(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid registry parameters: {0}")]
    InvalidParams(String),
}
