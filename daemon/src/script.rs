//! Operation scripts — a JSON array of calls replayed against a fresh core.
//!
//! ```json
//! [
//!   { "op": "fund", "caller": "0x01..", "amount": "10000000000000000000" },
//!   { "op": "register_airline", "caller": "0x01..", "candidate": "0x03..", "name": "Airline3" },
//!   { "op": "record_vote", "caller": "0x03..", "candidate": "0x07.." },
//!   { "op": "is_airline", "airline": "0x07.." }
//! ]
//! ```
//!
//! Each operation produces one [`StepReport`]. A rejected operation does not
//! stop the replay.

use serde::{Deserialize, Serialize};
use surety_governance::{Admission, GovernanceEngine, VoteOutcome};
use surety_types::{ActorId, FundAmount};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    SetOperatingStatus { caller: ActorId, operational: bool },
    SetTestingMode { caller: ActorId, enabled: bool },
    Fund { caller: ActorId, amount: FundAmount },
    RegisterAirline { caller: ActorId, candidate: ActorId, name: String },
    RecordVote { caller: ActorId, candidate: ActorId },
    IsOperational,
    IsAirline { airline: ActorId },
    IsFunded { airline: ActorId },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetOperatingStatus { .. } => "set_operating_status",
            Self::SetTestingMode { .. } => "set_testing_mode",
            Self::Fund { .. } => "fund",
            Self::RegisterAirline { .. } => "register_airline",
            Self::RecordVote { .. } => "record_vote",
            Self::IsOperational => "is_operational",
            Self::IsAirline { .. } => "is_airline",
            Self::IsFunded { .. } => "is_funded",
        }
    }
}

/// Result of one replayed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    pub ok: bool,
    /// Human-readable outcome or rejection reason.
    pub detail: String,
}

pub fn parse(script: &str) -> Result<Vec<Operation>, serde_json::Error> {
    serde_json::from_str(script)
}

/// Apply every operation in order and report each outcome.
pub fn replay(engine: &mut GovernanceEngine, ops: &[Operation]) -> Vec<StepReport> {
    ops.iter()
        .enumerate()
        .map(|(step, op)| {
            let (ok, detail) = match apply(engine, op) {
                Ok(detail) => (true, detail),
                Err(e) => (false, e.to_string()),
            };
            StepReport {
                step,
                op: op.name(),
                ok,
                detail,
            }
        })
        .collect()
}

fn apply(
    engine: &mut GovernanceEngine,
    op: &Operation,
) -> Result<String, surety_governance::GovernanceError> {
    Ok(match op {
        Operation::SetOperatingStatus {
            caller,
            operational,
        } => {
            engine.set_operating_status(caller, *operational)?;
            format!("operational = {operational}")
        }
        Operation::SetTestingMode { caller, enabled } => {
            engine.set_testing_mode(caller, *enabled)?;
            format!("testing_mode = {enabled}")
        }
        Operation::Fund { caller, amount } => {
            let total = engine.fund(caller, *amount)?;
            format!("total = {total}, funded = {}", engine.is_funded(caller))
        }
        Operation::RegisterAirline {
            caller,
            candidate,
            name,
        } => match engine.register_airline(caller, candidate, name)? {
            Admission::Direct => format!("{candidate} registered"),
            Admission::Consensus(outcome) => describe_vote(candidate, outcome),
        },
        Operation::RecordVote { caller, candidate } => {
            let outcome = engine.record_vote(caller, candidate)?;
            describe_vote(candidate, outcome)
        }
        Operation::IsOperational => engine.is_operational().to_string(),
        Operation::IsAirline { airline } => engine.is_airline(airline).to_string(),
        Operation::IsFunded { airline } => engine.is_funded(airline).to_string(),
    })
}

fn describe_vote(candidate: &ActorId, outcome: VoteOutcome) -> String {
    match outcome {
        VoteOutcome::Pending { votes, required } => {
            format!("{candidate} pending ({votes}/{required} votes)")
        }
        VoteOutcome::Promoted { votes, required } => {
            format!("{candidate} registered by consensus ({votes}/{required} votes)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surety_types::RegistryParams;

    fn actor(n: u8) -> ActorId {
        ActorId::new([n; 20])
    }

    fn engine() -> GovernanceEngine {
        GovernanceEngine::new(actor(0xa0), actor(1), "First Air", RegistryParams::default())
            .unwrap()
    }

    #[test]
    fn parses_tagged_operations() {
        let script = format!(
            r#"[
                {{ "op": "fund", "caller": "{a}", "amount": "10000000000000000000" }},
                {{ "op": "register_airline", "caller": "{a}", "candidate": "{b}", "name": "Two" }},
                {{ "op": "is_operational" }}
            ]"#,
            a = actor(1),
            b = actor(2),
        );
        let ops = parse(&script).unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::Fund {
                    caller: actor(1),
                    amount: FundAmount::units(10),
                },
                Operation::RegisterAirline {
                    caller: actor(1),
                    candidate: actor(2),
                    name: "Two".into(),
                },
                Operation::IsOperational,
            ]
        );
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        assert!(parse(r#"[{ "op": "withdraw" }]"#).is_err());
    }

    #[test]
    fn replay_continues_past_rejections() {
        let mut engine = engine();
        let ops = vec![
            // Unfunded sponsor.
            Operation::RegisterAirline {
                caller: actor(1),
                candidate: actor(2),
                name: "Two".into(),
            },
            Operation::Fund {
                caller: actor(1),
                amount: FundAmount::units(10),
            },
            Operation::RegisterAirline {
                caller: actor(1),
                candidate: actor(2),
                name: "Two".into(),
            },
            Operation::IsAirline { airline: actor(2) },
        ];
        let reports = replay(&mut engine, &ops);

        assert_eq!(reports.len(), 4);
        assert!(!reports[0].ok);
        assert!(reports[0].detail.contains("not a registered and funded airline"));
        assert!(reports[1].ok);
        assert!(reports[2].ok);
        assert_eq!(reports[3].detail, "true");
        assert_eq!(reports[3].op, "is_airline");
    }

    #[test]
    fn replay_reports_consensus_progress() {
        let mut engine = engine();
        let mut ops = vec![Operation::Fund {
            caller: actor(1),
            amount: FundAmount::units(10),
        }];
        for n in 3..=5 {
            ops.push(Operation::RegisterAirline {
                caller: actor(1),
                candidate: actor(n),
                name: format!("Airline{n}"),
            });
            ops.push(Operation::Fund {
                caller: actor(n),
                amount: FundAmount::units(10),
            });
        }
        ops.push(Operation::RegisterAirline {
            caller: actor(1),
            candidate: actor(7),
            name: "Airline7".into(),
        });
        ops.push(Operation::RecordVote {
            caller: actor(3),
            candidate: actor(7),
        });
        ops.push(Operation::RecordVote {
            caller: actor(4),
            candidate: actor(7),
        });

        let reports = replay(&mut engine, &ops);
        assert!(reports.iter().all(|r| r.ok));
        let last = reports.last().unwrap();
        assert!(last.detail.contains("registered by consensus (3/3 votes)"));
        assert!(engine.is_airline(&actor(7)));
    }

    #[test]
    fn demo_script_replays() {
        let ops = parse(include_str!("../../demos/multiparty.json")).unwrap();
        let mut engine = GovernanceEngine::new(
            ActorId::new([0xa0; 20]),
            actor(1),
            "First Airline",
            RegistryParams::default(),
        )
        .unwrap();
        let reports = replay(&mut engine, &ops);

        let rejected: Vec<_> = reports.iter().filter(|r| !r.ok).map(|r| r.step).collect();
        // Non-admin pause, testing mode while paused, unfunded sponsor,
        // and a vote after promotion.
        assert_eq!(rejected.len(), 4);
        assert_eq!(reports.last().unwrap().detail, "true");
        assert!(engine.is_airline(&actor(7)));
        assert!(!engine.is_testing_mode());
        assert_eq!(engine.registered_count(), 5);
    }
}
