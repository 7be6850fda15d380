//! Funding ledger — per-actor stake deposits.
//!
//! Deposits accumulate and are never withdrawn here; settlement is out of
//! scope. The ledger only answers whether an actor has met the minimum.

use crate::error::GovernanceError;
use crate::gate::OperationalGate;
use std::collections::HashMap;
use surety_types::{ActorId, FundAmount};

#[derive(Clone, Debug)]
pub struct FundingLedger {
    deposits: HashMap<ActorId, FundAmount>,
    min_funding: FundAmount,
}

impl FundingLedger {
    pub fn new(min_funding: FundAmount) -> Self {
        Self {
            deposits: HashMap::new(),
            min_funding,
        }
    }

    /// Add `amount` to `actor`'s funded total and return the new total.
    pub fn fund(
        &mut self,
        gate: &OperationalGate,
        actor: &ActorId,
        amount: FundAmount,
    ) -> Result<FundAmount, GovernanceError> {
        gate.require_operational()?;
        if amount.is_zero() {
            return Err(GovernanceError::ZeroAmount);
        }
        let current = self.funded_amount(actor);
        let total = current
            .checked_add(amount)
            .ok_or_else(|| GovernanceError::FundingOverflow(actor.to_string()))?;
        self.deposits.insert(*actor, total);

        tracing::info!(
            %actor,
            deposited = amount.raw(),
            total = total.raw(),
            funded = total >= self.min_funding,
            "funding deposited"
        );
        Ok(total)
    }

    pub fn funded_amount(&self, actor: &ActorId) -> FundAmount {
        self.deposits.get(actor).copied().unwrap_or(FundAmount::ZERO)
    }

    pub fn is_funded(&self, actor: &ActorId) -> bool {
        self.funded_amount(actor) >= self.min_funding
    }

    pub fn min_funding(&self) -> FundAmount {
        self.min_funding
    }
}
