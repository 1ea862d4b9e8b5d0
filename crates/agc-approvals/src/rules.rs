//! Deterministic rule engine
//!
//! Scores a normalized packet into `{risk, reasons, hints}`. Engines
//! are pure: no wall-clock, no randomness, no network — identical input
//! must always produce identical output, because the evaluator's
//! determinism guarantee rests on it. It is safe to call an engine
//! speculatively or more than once.

use crate::packet::{ApprovalPacket, ApprovalRisk};
use crate::payload::{ReleaseEnvironment, StagePayload};
use std::fmt;

/// Result of applying rules to one packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Computed risk level.
    pub risk: ApprovalRisk,
    /// One entry per fired rule.
    pub reasons: Vec<String>,
    /// Advisory notes for UIs and logs.
    pub hints: Vec<String>,
}

impl RuleOutcome {
    /// The neutral outcome: low risk, nothing fired.
    #[must_use]
    pub fn low() -> Self {
        Self {
            risk: ApprovalRisk::Low,
            reasons: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Raise the risk to at least `risk` and record why. Risk only
    /// ever escalates; a later low-risk rule cannot launder an earlier
    /// high-risk finding.
    pub fn escalate(&mut self, risk: ApprovalRisk, reason: impl Into<String>) {
        self.risk = self.risk.max(risk);
        self.reasons.push(reason.into());
    }

    /// Record an advisory hint without touching the risk.
    pub fn hint(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }
}

/// A pluggable risk-scoring engine.
pub trait RuleEngine: Send + Sync + fmt::Debug {
    /// Score a normalized packet. Must be deterministic and
    /// side-effect-free.
    fn evaluate(&self, packet: &ApprovalPacket) -> RuleOutcome;

    /// Engine name, for diagnostics.
    fn name(&self) -> &'static str;
}

impl<E: RuleEngine + ?Sized> RuleEngine for Box<E> {
    fn evaluate(&self, packet: &ApprovalPacket) -> RuleOutcome {
        (**self).evaluate(packet)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// The default engine: payload-driven scoring per stage.
///
/// An `Empty` payload always scores low (with a hint), so minimal
/// callers keep auto-approve behavior; risk comes entirely from what a
/// stage declares about its action.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageRiskRules;

impl StageRiskRules {
    /// Builder edits touching more targets than this are medium risk.
    pub const MAX_TOUCHED_TARGETS: usize = 10;
    /// Plans with more steps than this are medium risk.
    pub const MAX_PLANNED_STEPS: u32 = 25;
}

impl RuleEngine for StageRiskRules {
    fn evaluate(&self, packet: &ApprovalPacket) -> RuleOutcome {
        let mut outcome = RuleOutcome::low();

        match &packet.payload {
            StagePayload::Empty => {
                outcome.hint("no stage payload supplied; risk assessed as low by default");
            }
            StagePayload::Planner { planned_steps, .. } => {
                if *planned_steps > Self::MAX_PLANNED_STEPS {
                    outcome.escalate(
                        ApprovalRisk::Medium,
                        format!(
                            "plan contains {planned_steps} steps (limit {})",
                            Self::MAX_PLANNED_STEPS
                        ),
                    );
                }
            }
            StagePayload::Builder { operation, targets } => {
                if operation.is_destructive() {
                    outcome.escalate(
                        ApprovalRisk::High,
                        format!("{operation} is a destructive operation"),
                    );
                } else if matches!(operation, crate::payload::BuildOperation::DependencyChange) {
                    outcome.escalate(
                        ApprovalRisk::Medium,
                        "dependency changes alter the build environment",
                    );
                }
                if targets.len() > Self::MAX_TOUCHED_TARGETS {
                    outcome.escalate(
                        ApprovalRisk::Medium,
                        format!(
                            "touches {} targets (limit {})",
                            targets.len(),
                            Self::MAX_TOUCHED_TARGETS
                        ),
                    );
                }
            }
            StagePayload::Tester {
                suite,
                failing_cases,
            } => {
                // Testing is read-only; failures inform but never block.
                if *failing_cases > 0 {
                    outcome.hint(format!(
                        "{failing_cases} failing cases reported by suite \"{suite}\""
                    ));
                }
            }
            StagePayload::Release {
                environment,
                rollback_available,
                ..
            } => match environment {
                ReleaseEnvironment::Production => {
                    outcome.escalate(
                        ApprovalRisk::High,
                        "release targets the production environment",
                    );
                    if !rollback_available {
                        outcome.escalate(ApprovalRisk::High, "no rollback path is available");
                    }
                }
                ReleaseEnvironment::Staging => {
                    outcome.escalate(
                        ApprovalRisk::Medium,
                        "staging release should be reviewed before promotion",
                    );
                }
            },
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "stage-risk-rules"
    }
}
