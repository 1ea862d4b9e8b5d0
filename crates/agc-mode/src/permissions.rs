//! Per-mode capability matrix and permission guard
//!
//! A static decision table from runtime mode to the six guarded action
//! kinds. This module is security-critical: capability grows
//! monotonically from `OFFLINE` (read-only) through `AUTONOMOUS`
//! (everything except policy mutation), and the locked level grants
//! nothing — a second line of defense independent of the resolver's own
//! refusal to return it.
//!
//! The check is cheap and must be re-evaluated at every action
//! boundary; the mode can change between actions, so a cached verdict
//! is a stale verdict.

use crate::types::RuntimeMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// The guarded action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardAction {
    /// Observe state.
    Read,
    /// Mutate orchestrator-owned records.
    Write,
    /// Kick off a pipeline workflow.
    WorkflowTrigger,
    /// Change code under management.
    CodeMutation,
    /// Change the governance policy itself. Granted to no mode.
    PolicyMutation,
    /// Self-initiated remediation.
    AutoHeal,
}

impl GuardAction {
    /// Every guarded action kind, for table sweeps.
    pub const ALL: [Self; 6] = [
        Self::Read,
        Self::Write,
        Self::WorkflowTrigger,
        Self::CodeMutation,
        Self::PolicyMutation,
        Self::AutoHeal,
    ];

    /// Canonical wire name (SCREAMING_SNAKE_CASE).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::WorkflowTrigger => "WORKFLOW_TRIGGER",
            Self::CodeMutation => "CODE_MUTATION",
            Self::PolicyMutation => "POLICY_MUTATION",
            Self::AutoHeal => "AUTO_HEAL",
        }
    }
}

impl fmt::Display for GuardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuardAction {
    type Err = crate::error::ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READ" => Ok(Self::Read),
            "WRITE" => Ok(Self::Write),
            "WORKFLOW_TRIGGER" => Ok(Self::WorkflowTrigger),
            "CODE_MUTATION" => Ok(Self::CodeMutation),
            "POLICY_MUTATION" => Ok(Self::PolicyMutation),
            "AUTO_HEAL" => Ok(Self::AutoHeal),
            other => Err(crate::error::ParseModeError(other.to_string())),
        }
    }
}

/// One row of the capability matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCapabilities {
    /// READ allowed.
    pub allow_read: bool,
    /// WRITE allowed.
    pub allow_write: bool,
    /// WORKFLOW_TRIGGER allowed.
    pub allow_workflow_trigger: bool,
    /// CODE_MUTATION allowed.
    pub allow_code_mutation: bool,
    /// POLICY_MUTATION allowed.
    pub allow_policy_mutation: bool,
    /// AUTO_HEAL allowed.
    pub allow_auto_heal: bool,
}

impl ModeCapabilities {
    /// The empty row: nothing is allowed.
    pub const NONE: Self = Self {
        allow_read: false,
        allow_write: false,
        allow_workflow_trigger: false,
        allow_code_mutation: false,
        allow_policy_mutation: false,
        allow_auto_heal: false,
    };

    /// Whether this row allows `action`.
    #[inline]
    #[must_use]
    pub const fn allows(self, action: GuardAction) -> bool {
        match action {
            GuardAction::Read => self.allow_read,
            GuardAction::Write => self.allow_write,
            GuardAction::WorkflowTrigger => self.allow_workflow_trigger,
            GuardAction::CodeMutation => self.allow_code_mutation,
            GuardAction::PolicyMutation => self.allow_policy_mutation,
            GuardAction::AutoHeal => self.allow_auto_heal,
        }
    }
}

/// The capability matrix row for `mode`.
#[inline]
#[must_use]
pub const fn capabilities_for(mode: RuntimeMode) -> ModeCapabilities {
    match mode {
        RuntimeMode::Offline => ModeCapabilities {
            allow_read: true,
            ..ModeCapabilities::NONE
        },
        RuntimeMode::Safe => ModeCapabilities {
            allow_read: true,
            allow_write: true,
            ..ModeCapabilities::NONE
        },
        RuntimeMode::Supervised => ModeCapabilities {
            allow_read: true,
            allow_write: true,
            allow_workflow_trigger: true,
            allow_auto_heal: true,
            ..ModeCapabilities::NONE
        },
        RuntimeMode::Autonomous => ModeCapabilities {
            allow_read: true,
            allow_write: true,
            allow_workflow_trigger: true,
            allow_code_mutation: true,
            allow_auto_heal: true,
            ..ModeCapabilities::NONE
        },
        RuntimeMode::SelfEvolution => ModeCapabilities::NONE,
    }
}

/// Verdict of a permission check.
///
/// Denial is an expected, common outcome and is therefore data, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The action may proceed.
    Allowed,
    /// The action is denied at the current mode.
    Denied {
        /// Machine-readable reason for the denial.
        reason: String,
    },
}

impl PermissionDecision {
    /// Whether the action may proceed.
    #[inline]
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The denial reason, if denied.
    #[inline]
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied { reason } => Some(reason),
        }
    }
}

/// Check whether `action` is permitted at `mode`.
#[must_use]
pub fn check_permission(mode: RuntimeMode, action: GuardAction) -> PermissionDecision {
    if capabilities_for(mode).allows(action) {
        PermissionDecision::Allowed
    } else {
        warn!(%mode, %action, "action denied at current runtime mode");
        PermissionDecision::Denied {
            reason: format!("{action} not allowed in this mode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [RuntimeMode; 5] = [
        RuntimeMode::Offline,
        RuntimeMode::Safe,
        RuntimeMode::Supervised,
        RuntimeMode::Autonomous,
        RuntimeMode::SelfEvolution,
    ];

    /// Expected row per mode, in `GuardAction::ALL` order.
    const TABLE: [(RuntimeMode, [bool; 6]); 5] = [
        (RuntimeMode::Offline, [true, false, false, false, false, false]),
        (RuntimeMode::Safe, [true, true, false, false, false, false]),
        (RuntimeMode::Supervised, [true, true, true, false, false, true]),
        (RuntimeMode::Autonomous, [true, true, true, true, false, true]),
        (
            RuntimeMode::SelfEvolution,
            [false, false, false, false, false, false],
        ),
    ];

    #[test]
    fn every_cell_of_the_matrix_matches_the_table() {
        for (mode, expected) in TABLE {
            for (action, want) in GuardAction::ALL.into_iter().zip(expected) {
                assert_eq!(
                    check_permission(mode, action).is_allowed(),
                    want,
                    "{mode} x {action}"
                );
            }
        }
    }

    #[test]
    fn denial_reason_names_the_action() {
        // Scenario D.
        let decision = check_permission(RuntimeMode::Offline, GuardAction::Write);
        assert!(!decision.is_allowed());
        assert_eq!(decision.reason(), Some("WRITE not allowed in this mode"));
    }

    #[test]
    fn policy_mutation_is_granted_to_no_mode() {
        for mode in MODES {
            assert!(!check_permission(mode, GuardAction::PolicyMutation).is_allowed());
        }
    }

    #[test]
    fn capability_grows_monotonically_with_privilege() {
        let ordered = [
            RuntimeMode::Offline,
            RuntimeMode::Safe,
            RuntimeMode::Supervised,
            RuntimeMode::Autonomous,
        ];
        for pair in ordered.windows(2) {
            let (lower, higher) = (capabilities_for(pair[0]), capabilities_for(pair[1]));
            for action in GuardAction::ALL {
                assert!(
                    !lower.allows(action) || higher.allows(action),
                    "{:?} grants {action} but {:?} does not",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn action_names_parse_back() {
        for action in GuardAction::ALL {
            assert_eq!(action.as_str().parse::<GuardAction>().unwrap(), action);
        }
        assert!("DELETE_EVERYTHING".parse::<GuardAction>().is_err());
    }
}
