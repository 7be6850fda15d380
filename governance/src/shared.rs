//! Thread-safe handle over a [`GovernanceEngine`].
//!
//! Every call takes the lock exactly once, so registration and voting for the
//! same candidate are totally ordered and never interleave.

use crate::access::Role;
use crate::consensus::VoteOutcome;
use crate::engine::{AirlineRecord, GovernanceEngine};
use crate::error::GovernanceError;
use crate::events::GovernanceEvent;
use crate::registry::Admission;
use std::sync::{Arc, Mutex, MutexGuard};
use surety_types::{ActorId, FundAmount};

#[derive(Clone)]
pub struct SharedGovernance {
    inner: Arc<Mutex<GovernanceEngine>>,
}

impl SharedGovernance {
    pub fn new(engine: GovernanceEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, GovernanceEngine>, GovernanceError> {
        self.inner.lock().map_err(|_| GovernanceError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut GovernanceEngine) -> R,
    ) -> Result<R, GovernanceError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    pub fn is_operational(&self) -> Result<bool, GovernanceError> {
        Ok(self.lock()?.is_operational())
    }

    pub fn set_operating_status(&self, caller: &ActorId, mode: bool) -> Result<(), GovernanceError> {
        self.lock()?.set_operating_status(caller, mode)
    }

    pub fn has_role(&self, actor: &ActorId, role: Role) -> Result<bool, GovernanceError> {
        Ok(self.lock()?.has_role(actor, role))
    }

    pub fn fund(&self, caller: &ActorId, amount: FundAmount) -> Result<FundAmount, GovernanceError> {
        self.lock()?.fund(caller, amount)
    }

    pub fn is_funded(&self, actor: &ActorId) -> Result<bool, GovernanceError> {
        Ok(self.lock()?.is_funded(actor))
    }

    pub fn register_airline(
        &self,
        caller: &ActorId,
        candidate: &ActorId,
        name: &str,
    ) -> Result<Admission, GovernanceError> {
        self.lock()?.register_airline(caller, candidate, name)
    }

    pub fn is_airline(&self, actor: &ActorId) -> Result<bool, GovernanceError> {
        Ok(self.lock()?.is_airline(actor))
    }

    pub fn airline(&self, actor: &ActorId) -> Result<Option<AirlineRecord>, GovernanceError> {
        Ok(self.lock()?.airline(actor))
    }

    pub fn record_vote(
        &self,
        caller: &ActorId,
        candidate: &ActorId,
    ) -> Result<VoteOutcome, GovernanceError> {
        self.lock()?.record_vote(caller, candidate)
    }

    pub fn vote_count(&self, candidate: &ActorId) -> Result<u32, GovernanceError> {
        Ok(self.lock()?.vote_count(candidate))
    }

    pub fn drain_events(&self) -> Result<Vec<GovernanceEvent>, GovernanceError> {
        Ok(self.lock()?.drain_events())
    }
}
