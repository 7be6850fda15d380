//! Consensus engine — multiparty admission once the registry is large enough.
//!
//! Each registered, funded airline holds one vote per candidate. A candidate
//! is promoted on the vote that brings its tally to a strict majority of the
//! airlines registered *at that moment*; the denominator is not frozen when
//! the candidate first goes pending. Consensus is one-shot: after promotion
//! the ballot is discarded and further votes are rejected.

use crate::access::{AccessController, Role};
use crate::error::GovernanceError;
use crate::funding::FundingLedger;
use crate::gate::OperationalGate;
use crate::registry::{AirlineRegistry, AirlineStatus};
use std::collections::{BTreeSet, HashMap};
use surety_types::{ActorId, RegistryParams};

/// Tally after a vote was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Still short of a majority.
    Pending { votes: u32, required: u32 },
    /// This vote crossed the majority; the candidate is now registered.
    Promoted { votes: u32, required: u32 },
}

impl VoteOutcome {
    pub fn votes(&self) -> u32 {
        match self {
            Self::Pending { votes, .. } | Self::Promoted { votes, .. } => *votes,
        }
    }

    pub fn required(&self) -> u32 {
        match self {
            Self::Pending { required, .. } | Self::Promoted { required, .. } => *required,
        }
    }
}

/// Open ballots: candidate → distinct voters.
#[derive(Clone, Debug, Default)]
pub struct ConsensusEngine {
    ballots: HashMap<ActorId, BTreeSet<ActorId>>,
}

impl ConsensusEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast `voter`'s vote for a pending `candidate`.
    pub fn record_vote(
        &mut self,
        gate: &OperationalGate,
        access: &AccessController,
        registry: &mut AirlineRegistry,
        ledger: &FundingLedger,
        candidate: &ActorId,
        voter: &ActorId,
    ) -> Result<VoteOutcome, GovernanceError> {
        gate.require_operational()?;
        if registry.status(candidate) != AirlineStatus::PendingConsensus {
            return Err(GovernanceError::UnknownCandidate(candidate.to_string()));
        }
        access.require_role(registry, ledger, voter, Role::Participant)?;
        self.tally_vote(registry, candidate, voter)
    }

    /// Add a vote for a candidate the caller has already confirmed is pending
    /// from a voter already confirmed eligible, promoting on majority.
    pub(crate) fn tally_vote(
        &mut self,
        registry: &mut AirlineRegistry,
        candidate: &ActorId,
        voter: &ActorId,
    ) -> Result<VoteOutcome, GovernanceError> {
        if self.has_voted(candidate, voter) {
            tracing::debug!(%candidate, %voter, "duplicate vote ignored");
            return Err(GovernanceError::DuplicateVote {
                voter: voter.to_string(),
                candidate: candidate.to_string(),
            });
        }

        let ballot = self.ballots.entry(*candidate).or_default();
        ballot.insert(*voter);
        let votes = ballot.len() as u32;
        let required = RegistryParams::required_votes(registry.registered_count());

        if votes >= required {
            self.ballots.remove(candidate);
            registry.promote(candidate);
            tracing::info!(
                %candidate,
                %voter,
                votes,
                required,
                registered = registry.registered_count(),
                "consensus reached, airline registered"
            );
            Ok(VoteOutcome::Promoted { votes, required })
        } else {
            tracing::info!(%candidate, %voter, votes, required, "vote recorded");
            Ok(VoteOutcome::Pending { votes, required })
        }
    }

    /// Distinct votes on an open ballot; zero once the candidate is promoted.
    pub fn vote_count(&self, candidate: &ActorId) -> u32 {
        self.ballots
            .get(candidate)
            .map(|b| b.len() as u32)
            .unwrap_or(0)
    }

    pub fn has_voted(&self, candidate: &ActorId, voter: &ActorId) -> bool {
        self.ballots
            .get(candidate)
            .is_some_and(|b| b.contains(voter))
    }

    /// Voters on an open ballot, ordered by identity.
    pub fn voters(&self, candidate: &ActorId) -> Vec<ActorId> {
        self.ballots
            .get(candidate)
            .map(|b| b.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Admission;
    use surety_types::FundAmount;

    fn actor(n: u8) -> ActorId {
        ActorId::new([n; 20])
    }

    struct Fixture {
        gate: OperationalGate,
        access: AccessController,
        ledger: FundingLedger,
        consensus: ConsensusEngine,
        registry: AirlineRegistry,
    }

    /// Airlines 1..=4 registered and funded, airline 5 pending with airline 1's vote.
    fn four_members_one_pending() -> Fixture {
        let gate = OperationalGate::new();
        let access = AccessController::new(actor(0));
        let mut ledger = FundingLedger::new(FundAmount::new(10));
        let mut consensus = ConsensusEngine::new();
        let mut registry = AirlineRegistry::with_threshold(actor(1), "First Air", 4);

        ledger.fund(&gate, &actor(1), FundAmount::new(10)).unwrap();
        for n in 2..=4 {
            registry
                .register_airline(
                    &gate,
                    &access,
                    &ledger,
                    &mut consensus,
                    &actor(1),
                    &actor(n),
                    "member",
                )
                .unwrap();
            ledger.fund(&gate, &actor(n), FundAmount::new(10)).unwrap();
        }
        let admission = registry
            .register_airline(
                &gate,
                &access,
                &ledger,
                &mut consensus,
                &actor(1),
                &actor(5),
                "candidate",
            )
            .unwrap();
        assert!(!admission.is_registered());

        Fixture {
            gate,
            access,
            ledger,
            consensus,
            registry,
        }
    }

    impl Fixture {
        fn vote(&mut self, voter: u8, candidate: u8) -> Result<VoteOutcome, GovernanceError> {
            self.consensus.record_vote(
                &self.gate,
                &self.access,
                &mut self.registry,
                &self.ledger,
                &actor(candidate),
                &actor(voter),
            )
        }
    }

    #[test]
    fn two_of_four_is_not_enough() {
        let mut fx = four_members_one_pending();
        assert_eq!(
            fx.vote(2, 5).unwrap(),
            VoteOutcome::Pending {
                votes: 2,
                required: 3
            }
        );
        assert!(!fx.registry.is_airline(&actor(5)));
    }

    #[test]
    fn three_of_four_promotes() {
        let mut fx = four_members_one_pending();
        fx.vote(2, 5).unwrap();
        let outcome = fx.vote(3, 5).unwrap();
        assert_eq!(
            outcome,
            VoteOutcome::Promoted {
                votes: 3,
                required: 3
            }
        );
        assert!(fx.registry.is_airline(&actor(5)));
        assert_eq!(fx.registry.registered_count(), 5);
        assert_eq!(fx.consensus.vote_count(&actor(5)), 0);
    }

    #[test]
    fn duplicate_vote_does_not_change_tally() {
        let mut fx = four_members_one_pending();
        fx.vote(2, 5).unwrap();
        assert!(matches!(
            fx.vote(2, 5),
            Err(GovernanceError::DuplicateVote { .. })
        ));
        assert_eq!(fx.consensus.vote_count(&actor(5)), 2);
        assert_eq!(fx.consensus.voters(&actor(5)), vec![actor(1), actor(2)]);
        assert!(!fx.registry.is_airline(&actor(5)));
    }

    #[test]
    fn votes_after_promotion_are_unknown_candidate() {
        let mut fx = four_members_one_pending();
        fx.vote(2, 5).unwrap();
        fx.vote(3, 5).unwrap();
        assert_eq!(
            fx.vote(4, 5),
            Err(GovernanceError::UnknownCandidate(actor(5).to_string()))
        );
    }

    #[test]
    fn vote_for_unreferenced_candidate_is_unknown() {
        let mut fx = four_members_one_pending();
        assert!(matches!(
            fx.vote(2, 9),
            Err(GovernanceError::UnknownCandidate(_))
        ));
    }

    #[test]
    fn ineligible_voter_rejected() {
        let mut fx = four_members_one_pending();
        fx.vote(2, 5).unwrap();
        fx.vote(3, 5).unwrap();
        let admission = fx
            .registry
            .register_airline(
                &fx.gate,
                &fx.access,
                &fx.ledger,
                &mut fx.consensus,
                &actor(1),
                &actor(6),
                "six",
            )
            .unwrap();
        assert!(matches!(admission, Admission::Consensus(_)));

        // Airline 5 is registered but never funded; airline 9 is a stranger.
        assert_eq!(
            fx.vote(5, 6),
            Err(GovernanceError::SponsorNotEligible(actor(5).to_string()))
        );
        assert_eq!(
            fx.vote(9, 6),
            Err(GovernanceError::SponsorNotEligible(actor(9).to_string()))
        );
        assert_eq!(fx.consensus.vote_count(&actor(6)), 1);
    }

    #[test]
    fn closed_gate_blocks_votes() {
        let mut fx = four_members_one_pending();
        fx.gate
            .set_operating_status(&fx.access, &actor(0), false)
            .unwrap();
        assert_eq!(fx.vote(2, 5), Err(GovernanceError::NotOperational));
        assert_eq!(fx.consensus.vote_count(&actor(5)), 1);

        fx.gate
            .set_operating_status(&fx.access, &actor(0), true)
            .unwrap();
        assert!(fx.vote(2, 5).is_ok());
    }

    #[test]
    fn denominator_tracks_current_membership() {
        let mut fx = four_members_one_pending();
        let sponsor = |fx: &mut Fixture, candidate: u8| {
            fx.registry
                .register_airline(
                    &fx.gate,
                    &fx.access,
                    &fx.ledger,
                    &mut fx.consensus,
                    &actor(1),
                    &actor(candidate),
                    "late",
                )
                .unwrap()
        };

        // Candidate 6 collects 2 of the 3 votes a 4-member registry needs.
        sponsor(&mut fx, 6);
        fx.vote(2, 6).unwrap();

        // Promote 5 and then 7, growing membership to 6.
        fx.vote(2, 5).unwrap();
        fx.vote(3, 5).unwrap();
        sponsor(&mut fx, 7);
        fx.vote(2, 7).unwrap();
        fx.vote(3, 7).unwrap();
        assert_eq!(fx.registry.registered_count(), 6);

        // Three votes would have sufficed when 6 went pending; now 4 are needed.
        assert_eq!(
            fx.vote(3, 6).unwrap(),
            VoteOutcome::Pending {
                votes: 3,
                required: 4
            }
        );
        assert!(!fx.registry.is_airline(&actor(6)));
        fx.vote(4, 6).unwrap();
        assert!(fx.registry.is_airline(&actor(6)));
    }
}
