//! Access control — who may do what.
//!
//! Two roles exist. The [`Role::Administrator`] is a single identity fixed at
//! initialization. A [`Role::Participant`] is any airline that is both
//! registered and funded; only participants sponsor candidates or vote.

use crate::error::GovernanceError;
use crate::funding::FundingLedger;
use crate::registry::AirlineRegistry;
use surety_types::ActorId;

/// A capability required by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The identity that controls the operational gate and maintenance flags.
    Administrator,
    /// A registered, funded airline.
    Participant,
}

/// Holds the administrator identity. There is no transfer operation.
#[derive(Clone, Debug)]
pub struct AccessController {
    administrator: ActorId,
}

impl AccessController {
    pub fn new(administrator: ActorId) -> Self {
        Self { administrator }
    }

    pub fn administrator(&self) -> &ActorId {
        &self.administrator
    }

    pub fn is_administrator(&self, actor: &ActorId) -> bool {
        &self.administrator == actor
    }

    pub fn require_administrator(&self, actor: &ActorId) -> Result<(), GovernanceError> {
        if self.is_administrator(actor) {
            Ok(())
        } else {
            Err(GovernanceError::Unauthorized(actor.to_string()))
        }
    }

    /// Whether `actor` currently holds `role`.
    pub fn has_role(
        &self,
        registry: &AirlineRegistry,
        ledger: &FundingLedger,
        actor: &ActorId,
        role: Role,
    ) -> bool {
        match role {
            Role::Administrator => self.is_administrator(actor),
            Role::Participant => registry.is_airline(actor) && ledger.is_funded(actor),
        }
    }

    /// Like [`has_role`](Self::has_role) but mapped onto the error each role
    /// reports when missing.
    pub fn require_role(
        &self,
        registry: &AirlineRegistry,
        ledger: &FundingLedger,
        actor: &ActorId,
        role: Role,
    ) -> Result<(), GovernanceError> {
        if self.has_role(registry, ledger, actor, role) {
            return Ok(());
        }
        Err(match role {
            Role::Administrator => GovernanceError::Unauthorized(actor.to_string()),
            Role::Participant => GovernanceError::SponsorNotEligible(actor.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::OperationalGate;
    use surety_types::FundAmount;

    fn actor(n: u8) -> ActorId {
        ActorId::new([n; 20])
    }

    fn setup() -> (AccessController, AirlineRegistry, FundingLedger) {
        let access = AccessController::new(actor(0));
        let registry = AirlineRegistry::new(actor(1), "First Air");
        let ledger = FundingLedger::new(FundAmount::new(10));
        (access, registry, ledger)
    }

    #[test]
    fn only_the_administrator_is_administrator() {
        let (access, registry, ledger) = setup();
        assert!(access.is_administrator(&actor(0)));
        assert!(!access.is_administrator(&actor(1)));
        assert!(access.has_role(&registry, &ledger, &actor(0), Role::Administrator));
        assert!(!access.has_role(&registry, &ledger, &actor(9), Role::Administrator));
    }

    #[test]
    fn require_administrator_reports_caller() {
        let (access, _, _) = setup();
        assert_eq!(
            access.require_administrator(&actor(5)),
            Err(GovernanceError::Unauthorized(actor(5).to_string()))
        );
        assert!(access.require_administrator(&actor(0)).is_ok());
    }

    #[test]
    fn participant_needs_registration_and_funding() {
        let (access, registry, mut ledger) = setup();
        let gate = OperationalGate::new();

        // Registered but unfunded.
        assert!(!access.has_role(&registry, &ledger, &actor(1), Role::Participant));

        // Funded but unregistered.
        ledger.fund(&gate, &actor(2), FundAmount::new(10)).unwrap();
        assert!(!access.has_role(&registry, &ledger, &actor(2), Role::Participant));

        ledger.fund(&gate, &actor(1), FundAmount::new(10)).unwrap();
        assert!(access.has_role(&registry, &ledger, &actor(1), Role::Participant));
    }

    #[test]
    fn administrator_is_not_automatically_a_participant() {
        let (access, registry, ledger) = setup();
        assert_eq!(
            access.require_role(&registry, &ledger, &actor(0), Role::Participant),
            Err(GovernanceError::SponsorNotEligible(actor(0).to_string()))
        );
    }
}
