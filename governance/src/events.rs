//! Events emitted by committed governance operations.

use serde::{Deserialize, Serialize};
use surety_types::{ActorId, FundAmount};

/// How a candidate reached `Registered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionPath {
    /// Admitted unilaterally by a sponsor while the registry was small.
    Sponsor(ActorId),
    /// Admitted by majority vote.
    Consensus { votes: u32, required: u32 },
}

/// One committed state change. Rejected calls emit nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    OperatingStatusChanged {
        operational: bool,
    },
    TestingModeChanged {
        enabled: bool,
    },
    AirlineFunded {
        airline: ActorId,
        amount: FundAmount,
        total: FundAmount,
    },
    AirlinePending {
        airline: ActorId,
        name: String,
        sponsor: ActorId,
    },
    VoteRecorded {
        candidate: ActorId,
        voter: ActorId,
        votes: u32,
        required: u32,
    },
    AirlineRegistered {
        airline: ActorId,
        name: String,
        via: AdmissionPath,
    },
}

/// Synchronous fan-out bus for governance events.
///
/// Listeners run inline on the calling thread, after the state change has
/// been committed.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&GovernanceEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &GovernanceEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
