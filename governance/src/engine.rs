//! Governance engine — the single entry point over gate, access, funding,
//! registry and consensus.
//!
//! The engine owns all governance state and is passed explicitly to callers;
//! there is no ambient global. Every mutating call validates all of its
//! preconditions before applying any change, so a rejected call is
//! indistinguishable from one that was never made.

use crate::access::{AccessController, Role};
use crate::consensus::{ConsensusEngine, VoteOutcome};
use crate::error::GovernanceError;
use crate::events::{AdmissionPath, EventBus, GovernanceEvent};
use crate::funding::FundingLedger;
use crate::gate::OperationalGate;
use crate::registry::{Admission, AirlineEntry, AirlineRegistry, AirlineStatus};
use serde::{Deserialize, Serialize};
use surety_types::{ActorId, FundAmount, RegistryParams};

/// Point-in-time view of an airline, combining registry and funding state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineRecord {
    pub id: ActorId,
    pub name: String,
    pub status: AirlineStatus,
    pub funded_amount: FundAmount,
}

pub struct GovernanceEngine {
    params: RegistryParams,
    gate: OperationalGate,
    access: AccessController,
    ledger: FundingLedger,
    registry: AirlineRegistry,
    consensus: ConsensusEngine,
    testing_mode: bool,
    events: Vec<GovernanceEvent>,
    bus: EventBus,
}

impl GovernanceEngine {
    /// Initialize with a fixed administrator and a seeded first airline.
    ///
    /// The first airline starts registered but unfunded; it must fund before
    /// it can sponsor anyone.
    pub fn new(
        administrator: ActorId,
        first_airline: ActorId,
        first_airline_name: impl Into<String>,
        params: RegistryParams,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        let first_airline_name = first_airline_name.into();
        tracing::info!(
            %administrator,
            %first_airline,
            name = %first_airline_name,
            consensus_threshold = params.consensus_threshold,
            min_funding = params.min_funding.raw(),
            "governance initialized"
        );
        Ok(Self {
            gate: OperationalGate::new(),
            access: AccessController::new(administrator),
            ledger: FundingLedger::new(params.min_funding),
            registry: AirlineRegistry::with_threshold(
                first_airline,
                first_airline_name,
                params.consensus_threshold,
            ),
            consensus: ConsensusEngine::new(),
            testing_mode: false,
            events: Vec::new(),
            bus: EventBus::new(),
            params,
        })
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    // ── Operational gate ────────────────────────────────────────────────

    pub fn is_operational(&self) -> bool {
        self.gate.is_operational()
    }

    pub fn set_operating_status(
        &mut self,
        caller: &ActorId,
        mode: bool,
    ) -> Result<(), GovernanceError> {
        let changed = self.gate.is_operational() != mode;
        self.gate
            .set_operating_status(&self.access, caller, mode)
            .inspect_err(|e| rejected("set_operating_status", caller, e))?;
        if changed {
            self.commit(GovernanceEvent::OperatingStatusChanged { operational: mode });
        }
        Ok(())
    }

    pub fn is_testing_mode(&self) -> bool {
        self.testing_mode
    }

    /// Administrator maintenance flag. Unlike the gate itself, this is
    /// blocked while the gate is closed.
    pub fn set_testing_mode(&mut self, caller: &ActorId, mode: bool) -> Result<(), GovernanceError> {
        self.gate
            .require_operational()
            .and_then(|()| self.access.require_administrator(caller))
            .inspect_err(|e| rejected("set_testing_mode", caller, e))?;
        if self.testing_mode != mode {
            self.testing_mode = mode;
            tracing::info!(enabled = mode, "testing mode changed");
            self.commit(GovernanceEvent::TestingModeChanged { enabled: mode });
        }
        Ok(())
    }

    // ── Access ──────────────────────────────────────────────────────────

    pub fn administrator(&self) -> &ActorId {
        self.access.administrator()
    }

    pub fn is_administrator(&self, actor: &ActorId) -> bool {
        self.access.is_administrator(actor)
    }

    pub fn has_role(&self, actor: &ActorId, role: Role) -> bool {
        self.access
            .has_role(&self.registry, &self.ledger, actor, role)
    }

    pub fn require_role(&self, actor: &ActorId, role: Role) -> Result<(), GovernanceError> {
        self.access
            .require_role(&self.registry, &self.ledger, actor, role)
    }

    // ── Funding ─────────────────────────────────────────────────────────

    /// Deposit `amount` on behalf of `caller`; returns the new total.
    pub fn fund(&mut self, caller: &ActorId, amount: FundAmount) -> Result<FundAmount, GovernanceError> {
        let total = self
            .ledger
            .fund(&self.gate, caller, amount)
            .inspect_err(|e| rejected("fund", caller, e))?;
        self.commit(GovernanceEvent::AirlineFunded {
            airline: *caller,
            amount,
            total,
        });
        Ok(total)
    }

    pub fn is_funded(&self, actor: &ActorId) -> bool {
        self.ledger.is_funded(actor)
    }

    pub fn funded_amount(&self, actor: &ActorId) -> FundAmount {
        self.ledger.funded_amount(actor)
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// `caller` sponsors `candidate`. See [`AirlineRegistry::register_airline`].
    pub fn register_airline(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
        name: &str,
    ) -> Result<Admission, GovernanceError> {
        let before = self.registry.status(candidate);
        let admission = self
            .registry
            .register_airline(
                &self.gate,
                &self.access,
                &self.ledger,
                &mut self.consensus,
                caller,
                candidate,
                name,
            )
            .inspect_err(|e| rejected("register_airline", caller, e))?;

        match admission {
            Admission::Direct => {
                self.commit(GovernanceEvent::AirlineRegistered {
                    airline: *candidate,
                    name: name.to_string(),
                    via: AdmissionPath::Sponsor(*caller),
                });
            }
            Admission::Consensus(outcome) => {
                if before == AirlineStatus::Unregistered {
                    self.commit(GovernanceEvent::AirlinePending {
                        airline: *candidate,
                        name: name.to_string(),
                        sponsor: *caller,
                    });
                }
                self.commit_vote(candidate, caller, outcome);
            }
        }
        Ok(admission)
    }

    pub fn is_airline(&self, actor: &ActorId) -> bool {
        self.registry.is_airline(actor)
    }

    pub fn status(&self, actor: &ActorId) -> AirlineStatus {
        self.registry.status(actor)
    }

    pub fn airline(&self, actor: &ActorId) -> Option<AirlineRecord> {
        self.registry.entry(actor).map(|e| self.record(e))
    }

    pub fn registered_count(&self) -> u32 {
        self.registry.registered_count()
    }

    pub fn registered_airlines(&self) -> Vec<AirlineRecord> {
        self.registry
            .registered()
            .into_iter()
            .map(|e| self.record(e))
            .collect()
    }

    pub fn pending_airlines(&self) -> Vec<AirlineRecord> {
        self.registry
            .pending()
            .into_iter()
            .map(|e| self.record(e))
            .collect()
    }

    // ── Consensus ───────────────────────────────────────────────────────

    /// `caller` votes for pending `candidate`.
    pub fn record_vote(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
    ) -> Result<VoteOutcome, GovernanceError> {
        let outcome = self
            .consensus
            .record_vote(
                &self.gate,
                &self.access,
                &mut self.registry,
                &self.ledger,
                candidate,
                caller,
            )
            .inspect_err(|e| rejected("record_vote", caller, e))?;
        self.commit_vote(candidate, caller, outcome);
        Ok(outcome)
    }

    pub fn vote_count(&self, candidate: &ActorId) -> u32 {
        self.consensus.vote_count(candidate)
    }

    pub fn has_voted(&self, candidate: &ActorId, voter: &ActorId) -> bool {
        self.consensus.has_voted(candidate, voter)
    }

    pub fn voters(&self, candidate: &ActorId) -> Vec<ActorId> {
        self.consensus.voters(candidate)
    }

    /// Votes a pending candidate needs against the current membership.
    pub fn required_votes(&self) -> u32 {
        RegistryParams::required_votes(self.registry.registered_count())
    }

    // ── Events ──────────────────────────────────────────────────────────

    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    fn commit(&mut self, event: GovernanceEvent) {
        self.bus.emit(&event);
        self.events.push(event);
    }

    fn commit_vote(&mut self, candidate: &ActorId, voter: &ActorId, outcome: VoteOutcome) {
        self.commit(GovernanceEvent::VoteRecorded {
            candidate: *candidate,
            voter: *voter,
            votes: outcome.votes(),
            required: outcome.required(),
        });
        if let VoteOutcome::Promoted { votes, required } = outcome {
            let name = self
                .registry
                .entry(candidate)
                .map(|e| e.name.clone())
                .unwrap_or_default();
            self.commit(GovernanceEvent::AirlineRegistered {
                airline: *candidate,
                name,
                via: AdmissionPath::Consensus { votes, required },
            });
        }
    }

    fn record(&self, entry: &AirlineEntry) -> AirlineRecord {
        AirlineRecord {
            id: entry.id,
            name: entry.name.clone(),
            status: entry.status,
            funded_amount: self.ledger.funded_amount(&entry.id),
        }
    }
}

fn rejected(op: &'static str, caller: &ActorId, error: &GovernanceError) {
    tracing::debug!(op, %caller, %error, "operation rejected");
}
