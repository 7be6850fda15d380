//! Operational gate — the process-wide pause switch.

use crate::access::AccessController;
use crate::error::GovernanceError;
use surety_types::ActorId;

/// While closed, every mutating entry point fails with
/// [`GovernanceError::NotOperational`]. Reads stay available.
#[derive(Clone, Debug)]
pub struct OperationalGate {
    operational: bool,
}

impl OperationalGate {
    /// A freshly initialized gate is open.
    pub fn new() -> Self {
        Self { operational: true }
    }

    pub fn is_operational(&self) -> bool {
        self.operational
    }

    pub fn require_operational(&self) -> Result<(), GovernanceError> {
        if self.operational {
            Ok(())
        } else {
            Err(GovernanceError::NotOperational)
        }
    }

    /// Open or close the gate. Administrator only; allowed while closed so the
    /// gate can be reopened.
    pub fn set_operating_status(
        &mut self,
        access: &AccessController,
        caller: &ActorId,
        mode: bool,
    ) -> Result<(), GovernanceError> {
        access.require_administrator(caller)?;
        if self.operational != mode {
            tracing::info!(operational = mode, by = %caller, "operating status changed");
        }
        self.operational = mode;
        Ok(())
    }
}

impl Default for OperationalGate {
    fn default() -> Self {
        Self::new()
    }
}
