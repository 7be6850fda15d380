//! Fundamental types for the airline surety governance core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! actor identities, funding quantities, and the registry's configuration constants.

pub mod actor;
pub mod error;
pub mod funding;
pub mod params;

pub use actor::ActorId;
pub use error::SuretyError;
pub use funding::{FundAmount, ONE_UNIT};
pub use params::RegistryParams;
