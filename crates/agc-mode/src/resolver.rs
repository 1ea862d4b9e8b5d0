//! Runtime-mode resolver
//!
//! A pure, total function from caller-supplied state and the policy
//! document to a resolved [`ActiveMode`]. The rules apply in strict
//! priority order:
//!
//! 1. active downgrade triggers short-circuit everything else;
//! 2. candidate selection: requested, then environment override, then
//!    current mode, then the configured default;
//! 3. a locked candidate forces SAFE;
//! 4. a transition not listed in the policy is blocked, keeping the
//!    current mode;
//! 5. a candidate requiring explicit confirmation without one forces
//!    SAFE.
//!
//! The function never fails; every ambiguity degrades toward SAFE.

use crate::config::ModeConfig;
use crate::types::{ActiveMode, ResolveInput, ResolveResult, RuntimeMode};
use tracing::warn;

/// Environment variable carrying a mode-name override.
pub const RUNTIME_MODE_ENV: &str = "AGC_RUNTIME_MODE";

/// Read the environment-level mode override, if one is set and names a
/// known mode. Unparseable values are logged and ignored.
#[must_use]
pub fn env_mode_override() -> Option<RuntimeMode> {
    let raw = std::env::var(RUNTIME_MODE_ENV).ok()?;
    match raw.parse::<RuntimeMode>() {
        Ok(mode) => Some(mode),
        Err(err) => {
            warn!(%err, value = %raw, "ignoring unparseable {RUNTIME_MODE_ENV}");
            None
        }
    }
}

/// Resolve the runtime mode for one request.
#[must_use]
pub fn resolve(input: &ResolveInput, config: &ModeConfig) -> ResolveResult {
    let mut warnings = Vec::new();
    let blocked_transitions = Vec::new();

    // 1) Downgrade triggers override every other rule. The safest
    //    mapped target wins; triggers that map to nothing still force
    //    SAFE, since an unexplained safety signal is not a licence to
    //    continue.
    if !input.triggers.is_empty() {
        let targets: Vec<ActiveMode> = input
            .triggers
            .iter()
            .filter_map(|name| config.trigger_target(name))
            .collect();

        let (mode, reason) = if targets.contains(&ActiveMode::Safe) {
            (ActiveMode::Safe, "Downgraded due to triggers (SAFE).")
        } else if targets.contains(&ActiveMode::Supervised) {
            (
                ActiveMode::Supervised,
                "Downgraded due to triggers (SUPERVISED).",
            )
        } else {
            (ActiveMode::Safe, "Downgraded due to triggers (fallback SAFE).")
        };

        warn!(%mode, triggers = ?input.triggers, "runtime mode downgraded by triggers");
        return ResolveResult {
            mode,
            reason: reason.to_string(),
            warnings,
            blocked_transitions,
        };
    }

    // 2) Candidate selection.
    let candidate = input
        .requested_mode
        .or(input.env_mode)
        .or(input.current_mode)
        .unwrap_or(RuntimeMode::from_active(config.default_mode));

    // 3) The locked level is never resolvable.
    let Some(candidate) = candidate.as_active() else {
        warnings.push("SELF_EVOLUTION is locked; forcing SAFE.".to_string());
        warn!("locked mode requested; forcing SAFE");
        return ResolveResult {
            mode: ActiveMode::Safe,
            reason: "Locked mode requested; forced SAFE.".to_string(),
            warnings,
            blocked_transitions,
        };
    };

    // 4) Transition validation against the current mode.
    let current = input
        .current_mode
        .unwrap_or(RuntimeMode::from_active(config.default_mode));
    let wide = RuntimeMode::from_active(candidate);
    if wide != current && !config.transitions_from(current).contains(&wide) {
        let mut blocked_transitions = blocked_transitions;
        blocked_transitions.push(format!("{current} -> {candidate}"));
        warnings.push("Requested transition is not allowed; keeping current mode.".to_string());
        let mode = current.as_active().unwrap_or(ActiveMode::Safe);
        warn!(%current, %candidate, "runtime mode transition blocked");
        return ResolveResult {
            mode,
            reason: "Transition blocked.".to_string(),
            warnings,
            blocked_transitions,
        };
    }

    // 5) Explicit confirmation requirement.
    if config.requires_confirmation(wide) && !input.explicit_confirmation {
        warnings.push(format!(
            "Explicit confirmation required for {candidate}; forcing SAFE."
        ));
        warn!(%candidate, "explicit confirmation missing; forcing SAFE");
        return ResolveResult {
            mode: ActiveMode::Safe,
            reason: "Missing explicit confirmation.".to_string(),
            warnings,
            blocked_transitions,
        };
    }

    ResolveResult {
        mode: candidate,
        reason: "Resolved successfully.".to_string(),
        warnings,
        blocked_transitions,
    }
}
