//! Governance core for an airline membership registry.
//!
//! Airlines must be admitted to an authorized set before they may take part in
//! the wider system. Admission is gated three ways:
//! - an administrator-controlled operational switch,
//! - a funding precondition on the sponsoring airline,
//! - multiparty consensus once the registry reaches a fixed size.
//!
//! Below the consensus threshold a registered, funded airline admits new
//! members on its own. At or above it, candidates wait for votes from a strict
//! majority of the currently registered airlines.

pub mod access;
pub mod consensus;
pub mod engine;
pub mod error;
pub mod events;
pub mod funding;
pub mod gate;
pub mod registry;
pub mod shared;

pub use access::{AccessController, Role};
pub use consensus::{ConsensusEngine, VoteOutcome};
pub use engine::{AirlineRecord, GovernanceEngine};
pub use error::GovernanceError;
pub use events::{AdmissionPath, EventBus, GovernanceEvent};
pub use funding::FundingLedger;
pub use gate::OperationalGate;
pub use registry::{Admission, AirlineEntry, AirlineRegistry, AirlineStatus};
pub use shared::SharedGovernance;
