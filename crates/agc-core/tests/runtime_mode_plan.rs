//! Functional tests for runtime-mode resolution through the facade.
//!
//! These tests exercise the fail-safe posture end to end:
//! - disallowed transitions are blocked and recorded;
//! - active downgrade triggers override any request;
//! - confirmation-gated modes degrade to SAFE without confirmation;
//! - the locked level is never resolved.

use agc_core::{ActiveMode, GovernanceContext, ResolveInput, ResolveResult, RuntimeMode};
use agc_test_utils::{init_test_tracing, sample_mode_config, transition_request};
use pretty_assertions::assert_eq;

fn context() -> GovernanceContext {
    init_test_tracing();
    GovernanceContext::new(sample_mode_config())
}

fn resolve(input: ResolveInput) -> ResolveResult {
    context().resolve_mode(input)
}

/// Tenet: a transition the policy does not list is blocked.
///
/// From SAFE the policy allows only SAFE and SUPERVISED; a jump to
/// AUTONOMOUS keeps the current mode and records the blocked edge.
#[test]
fn direct_jump_to_autonomous_is_blocked() {
    let mut input = transition_request(RuntimeMode::Safe, RuntimeMode::Autonomous);
    input.explicit_confirmation = true;

    let result = resolve(input);
    assert_eq!(result.mode, ActiveMode::Safe);
    assert_eq!(result.blocked_transitions, vec!["SAFE -> AUTONOMOUS"]);
    assert_eq!(result.reason, "Transition blocked.");
}

/// Tenet: an active downgrade trigger overrides any request.
#[test]
fn safety_trigger_forces_safe_over_an_autonomous_request() {
    let mut input = transition_request(RuntimeMode::Supervised, RuntimeMode::Autonomous);
    input.explicit_confirmation = true;
    input.triggers = vec!["policyViolation".to_string()];

    let result = resolve(input);
    assert_eq!(result.mode, ActiveMode::Safe);
    assert_eq!(result.reason, "Downgraded due to triggers (SAFE).");
}

/// Tenet: confirmation-gated modes degrade to SAFE without an explicit
/// confirmation, and resolve once one is supplied.
#[test]
fn autonomous_requires_explicit_confirmation() {
    let input = transition_request(RuntimeMode::Supervised, RuntimeMode::Autonomous);
    let result = resolve(input.clone());
    assert_eq!(result.mode, ActiveMode::Safe);
    assert_eq!(result.reason, "Missing explicit confirmation.");

    let confirmed = ResolveInput {
        explicit_confirmation: true,
        ..input
    };
    assert_eq!(resolve(confirmed).mode, ActiveMode::Autonomous);
}

/// Tenet: the locked level cannot be resolved, whatever asks for it.
#[test]
fn locked_level_always_degrades_to_safe() {
    let result = resolve(ResolveInput {
        requested_mode: Some(RuntimeMode::SelfEvolution),
        explicit_confirmation: true,
        ..ResolveInput::default()
    });
    assert_eq!(result.mode, ActiveMode::Safe);
    assert_eq!(result.reason, "Locked mode requested; forced SAFE.");
    assert!(!result.warnings.is_empty());
}

/// Tenet: with no inputs at all, the policy default wins.
#[test]
fn empty_input_resolves_to_the_policy_default() {
    let result = resolve(ResolveInput::default());
    assert_eq!(result.mode, ActiveMode::Safe);
    assert_eq!(result.reason, "Resolved successfully.");
}

/// Tenet: the shipped policy document loads and resolves.
#[test]
fn shipped_policy_document_is_usable() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/runtime-mode.json");
    let ctx = GovernanceContext::from_policy_path(path).unwrap();

    let result = ctx.resolve_mode(ResolveInput::default());
    assert_eq!(result.mode, ActiveMode::Safe);
}

/// Tenet: stepwise widening along policy edges succeeds.
#[test]
fn supervised_to_autonomous_is_an_allowed_edge() {
    let mut input = transition_request(RuntimeMode::Supervised, RuntimeMode::Autonomous);
    input.explicit_confirmation = true;

    let result = resolve(input);
    assert_eq!(result.mode, ActiveMode::Autonomous);
    assert!(result.blocked_transitions.is_empty());
}
