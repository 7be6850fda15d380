//! Airline registry — the membership set and its admission lifecycle.
//!
//! ```text
//! Unregistered --(sponsor, registry below threshold)--> Registered
//! Unregistered --(sponsor, registry at/above threshold)--> PendingConsensus
//! PendingConsensus --(strict majority of registered airlines)--> Registered
//! ```
//!
//! Nothing leaves `Registered` and records are never removed.

use crate::access::{AccessController, Role};
use crate::consensus::{ConsensusEngine, VoteOutcome};
use crate::error::GovernanceError;
use crate::funding::FundingLedger;
use crate::gate::OperationalGate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surety_types::ActorId;

/// Lifecycle state of an identity within the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AirlineStatus {
    /// Never referenced by a registration attempt.
    Unregistered,
    /// Awaiting votes from the registered airlines.
    PendingConsensus,
    /// Full member.
    Registered,
}

/// A registry entry, created on the first registration attempt that names it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineEntry {
    pub id: ActorId,
    /// Display name given by the first sponsor.
    pub name: String,
    pub status: AirlineStatus,
}

/// How a successful `register_airline` call was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The sponsor admitted the candidate unilaterally.
    Direct,
    /// The candidate is (or was) under consensus; the sponsor's call counted as a vote.
    Consensus(VoteOutcome),
}

impl Admission {
    /// Whether the candidate is registered after this call.
    pub fn is_registered(&self) -> bool {
        matches!(
            self,
            Admission::Direct | Admission::Consensus(VoteOutcome::Promoted { .. })
        )
    }
}

pub struct AirlineRegistry {
    airlines: HashMap<ActorId, AirlineEntry>,
    registered_count: u32,
    consensus_threshold: u32,
}

impl AirlineRegistry {
    /// Create a registry seeded with `first_airline` as its only member.
    ///
    /// Uses the default consensus threshold; see [`with_threshold`](Self::with_threshold).
    pub fn new(first_airline: ActorId, name: impl Into<String>) -> Self {
        Self::with_threshold(
            first_airline,
            name,
            surety_types::RegistryParams::default().consensus_threshold,
        )
    }

    pub fn with_threshold(
        first_airline: ActorId,
        name: impl Into<String>,
        consensus_threshold: u32,
    ) -> Self {
        let mut airlines = HashMap::new();
        airlines.insert(
            first_airline,
            AirlineEntry {
                id: first_airline,
                name: name.into(),
                status: AirlineStatus::Registered,
            },
        );
        Self {
            airlines,
            registered_count: 1,
            consensus_threshold,
        }
    }

    pub fn status(&self, id: &ActorId) -> AirlineStatus {
        self.airlines
            .get(id)
            .map(|a| a.status)
            .unwrap_or(AirlineStatus::Unregistered)
    }

    /// True iff `id` is a full member.
    pub fn is_airline(&self, id: &ActorId) -> bool {
        self.status(id) == AirlineStatus::Registered
    }

    pub fn entry(&self, id: &ActorId) -> Option<&AirlineEntry> {
        self.airlines.get(id)
    }

    pub fn registered_count(&self) -> u32 {
        self.registered_count
    }

    pub fn consensus_threshold(&self) -> u32 {
        self.consensus_threshold
    }

    /// Whether a new candidate would currently need consensus.
    pub fn requires_consensus(&self) -> bool {
        self.registered_count >= self.consensus_threshold
    }

    /// Registered airlines, ordered by identity.
    pub fn registered(&self) -> Vec<&AirlineEntry> {
        let mut out: Vec<_> = self
            .airlines
            .values()
            .filter(|a| a.status == AirlineStatus::Registered)
            .collect();
        out.sort_by_key(|a| a.id);
        out
    }

    /// Candidates currently awaiting consensus, ordered by identity.
    pub fn pending(&self) -> Vec<&AirlineEntry> {
        let mut out: Vec<_> = self
            .airlines
            .values()
            .filter(|a| a.status == AirlineStatus::PendingConsensus)
            .collect();
        out.sort_by_key(|a| a.id);
        out
    }

    /// Sponsor `candidate` for membership.
    ///
    /// Below the consensus threshold the candidate is admitted at once.
    /// Otherwise it enters `PendingConsensus` and the sponsor's call is
    /// recorded as its vote. Calling this for a candidate that is already
    /// pending is how further airlines vote through the registration path;
    /// `name` is ignored in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn register_airline(
        &mut self,
        gate: &OperationalGate,
        access: &AccessController,
        ledger: &FundingLedger,
        consensus: &mut ConsensusEngine,
        sponsor: &ActorId,
        candidate: &ActorId,
        name: &str,
    ) -> Result<Admission, GovernanceError> {
        gate.require_operational()?;
        access.require_role(self, ledger, sponsor, Role::Participant)?;

        match self.status(candidate) {
            AirlineStatus::Registered => {
                Err(GovernanceError::AlreadyRegistered(candidate.to_string()))
            }
            AirlineStatus::PendingConsensus => {
                let outcome = consensus.tally_vote(self, candidate, sponsor)?;
                Ok(Admission::Consensus(outcome))
            }
            AirlineStatus::Unregistered if !self.requires_consensus() => {
                self.airlines.insert(
                    *candidate,
                    AirlineEntry {
                        id: *candidate,
                        name: name.to_string(),
                        status: AirlineStatus::Registered,
                    },
                );
                self.registered_count += 1;
                tracing::info!(
                    %candidate,
                    %sponsor,
                    name,
                    registered = self.registered_count,
                    "airline registered by sponsor"
                );
                Ok(Admission::Direct)
            }
            AirlineStatus::Unregistered => {
                // A fresh candidate has no ballots, so the sponsor's vote cannot
                // be a duplicate and tally_vote cannot fail after this insert.
                self.airlines.insert(
                    *candidate,
                    AirlineEntry {
                        id: *candidate,
                        name: name.to_string(),
                        status: AirlineStatus::PendingConsensus,
                    },
                );
                tracing::info!(
                    %candidate,
                    %sponsor,
                    name,
                    registered = self.registered_count,
                    "airline awaiting consensus"
                );
                let outcome = consensus.tally_vote(self, candidate, sponsor)?;
                Ok(Admission::Consensus(outcome))
            }
        }
    }

    /// Move a pending candidate to `Registered`. Only the consensus engine calls this.
    pub(crate) fn promote(&mut self, candidate: &ActorId) {
        if let Some(entry) = self.airlines.get_mut(candidate) {
            if entry.status == AirlineStatus::PendingConsensus {
                entry.status = AirlineStatus::Registered;
                self.registered_count += 1;
            }
        }
    }
}
