//! Runtime-mode types
//!
//! [`RuntimeMode`] is the full, ordered set of autonomy levels accepted
//! as input. [`ActiveMode`] is the subset a resolution may produce: the
//! locked level exists only to be rejected and cannot appear in a
//! [`ResolveResult`].

use crate::error::ParseModeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered autonomy/privilege levels.
///
/// Capability grows monotonically from `Offline` (read-only) through
/// `Autonomous`. `SelfEvolution` is locked: it is a valid *input*
/// (callers and config may mention it) but is never returned as a
/// resolved mode and grants no capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeMode {
    /// Read-only; the orchestrator observes but changes nothing.
    Offline,
    /// Reads and writes, no workflow or code mutation.
    Safe,
    /// Workflow triggering and auto-heal under human supervision.
    Supervised,
    /// Everything except policy mutation.
    Autonomous,
    /// Locked level; rejected by the resolver, grants nothing.
    SelfEvolution,
}

impl RuntimeMode {
    /// Canonical wire name (SCREAMING_SNAKE_CASE).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "OFFLINE",
            Self::Safe => "SAFE",
            Self::Supervised => "SUPERVISED",
            Self::Autonomous => "AUTONOMOUS",
            Self::SelfEvolution => "SELF_EVOLUTION",
        }
    }

    /// Whether this level is locked out of resolution.
    #[inline]
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::SelfEvolution)
    }

    /// Narrow to the resolvable subset; `None` for the locked level.
    #[inline]
    #[must_use]
    pub const fn as_active(self) -> Option<ActiveMode> {
        match self {
            Self::Offline => Some(ActiveMode::Offline),
            Self::Safe => Some(ActiveMode::Safe),
            Self::Supervised => Some(ActiveMode::Supervised),
            Self::Autonomous => Some(ActiveMode::Autonomous),
            Self::SelfEvolution => None,
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFFLINE" => Ok(Self::Offline),
            "SAFE" => Ok(Self::Safe),
            "SUPERVISED" => Ok(Self::Supervised),
            "AUTONOMOUS" => Ok(Self::Autonomous),
            "SELF_EVOLUTION" => Ok(Self::SelfEvolution),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// The resolvable subset of [`RuntimeMode`].
///
/// Every resolution produces one of these four levels; the locked level
/// is structurally excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiveMode {
    /// See [`RuntimeMode::Offline`].
    Offline,
    /// See [`RuntimeMode::Safe`].
    Safe,
    /// See [`RuntimeMode::Supervised`].
    Supervised,
    /// See [`RuntimeMode::Autonomous`].
    Autonomous,
}

impl ActiveMode {
    /// Canonical wire name (SCREAMING_SNAKE_CASE).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        RuntimeMode::from_active(self).as_str()
    }
}

impl RuntimeMode {
    /// Widen an [`ActiveMode`] back into the full set (const-friendly
    /// counterpart of the `From` impl).
    #[inline]
    #[must_use]
    pub const fn from_active(mode: ActiveMode) -> Self {
        match mode {
            ActiveMode::Offline => Self::Offline,
            ActiveMode::Safe => Self::Safe,
            ActiveMode::Supervised => Self::Supervised,
            ActiveMode::Autonomous => Self::Autonomous,
        }
    }
}

impl From<ActiveMode> for RuntimeMode {
    fn from(mode: ActiveMode) -> Self {
        Self::from_active(mode)
    }
}

impl fmt::Display for ActiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied inputs to one mode resolution.
///
/// `current_mode` comes from the caller's own storage (the core keeps
/// no mode state); `triggers` are the names of currently-active
/// downgrade triggers, matched against the policy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveInput {
    /// Mode explicitly requested by the caller, if any.
    #[serde(default)]
    pub requested_mode: Option<RuntimeMode>,
    /// Last known mode, supplied from external storage.
    #[serde(default)]
    pub current_mode: Option<RuntimeMode>,
    /// Environment-level override (see [`crate::env_mode_override`]).
    #[serde(default)]
    pub env_mode: Option<RuntimeMode>,
    /// Whether an explicit confirmation accompanied the request.
    #[serde(default)]
    pub explicit_confirmation: bool,
    /// Names of active downgrade triggers.
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// Outcome of one mode resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// The resolved mode; never the locked level.
    pub mode: ActiveMode,
    /// Human-readable explanation of the outcome.
    pub reason: String,
    /// Non-fatal diagnostics accumulated during resolution.
    pub warnings: Vec<String>,
    /// Transitions that were requested but disallowed, as `"FROM -> TO"`.
    pub blocked_transitions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn modes_are_ordered_by_privilege() {
        assert!(RuntimeMode::Offline < RuntimeMode::Safe);
        assert!(RuntimeMode::Safe < RuntimeMode::Supervised);
        assert!(RuntimeMode::Supervised < RuntimeMode::Autonomous);
    }

    #[test]
    fn wire_names_round_trip() {
        for mode in [
            RuntimeMode::Offline,
            RuntimeMode::Safe,
            RuntimeMode::Supervised,
            RuntimeMode::Autonomous,
            RuntimeMode::SelfEvolution,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            let back: RuntimeMode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mode);
        }
    }

    #[test]
    fn from_str_is_case_insensitive_and_trims() {
        assert_eq!(" safe ".parse::<RuntimeMode>().unwrap(), RuntimeMode::Safe);
        assert_eq!(
            "self_evolution".parse::<RuntimeMode>().unwrap(),
            RuntimeMode::SelfEvolution
        );
        assert!("TURBO".parse::<RuntimeMode>().is_err());
    }

    #[test]
    fn only_the_locked_level_fails_narrowing() {
        assert_eq!(RuntimeMode::Safe.as_active(), Some(ActiveMode::Safe));
        assert_eq!(RuntimeMode::SelfEvolution.as_active(), None);
        assert!(RuntimeMode::SelfEvolution.is_locked());
        assert!(!RuntimeMode::Autonomous.is_locked());
    }

    #[test]
    fn active_mode_widens_losslessly() {
        for mode in [
            ActiveMode::Offline,
            ActiveMode::Safe,
            ActiveMode::Supervised,
            ActiveMode::Autonomous,
        ] {
            assert_eq!(RuntimeMode::from(mode).as_active(), Some(mode));
        }
    }
}
