//! Testing utilities for the AGC workspace
//!
//! Shared fixtures: a manually-advanced clock for cache expiry tests,
//! a canonical mode policy, and input builders.

#![allow(missing_docs)]

use agc_approvals::cache::Clock;
use agc_approvals::{ApprovalInput, StageCategory};
use agc_mode::{ModeConfig, ResolveInput, RuntimeMode};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// The canonical test policy: SAFE default, step-wise widening,
/// downgrade triggers, and confirmation-gated AUTONOMOUS.
pub fn sample_mode_config() -> ModeConfig {
    ModeConfig::from_json(SAMPLE_MODE_POLICY).unwrap()
}

pub const SAMPLE_MODE_POLICY: &str = r#"{
    "defaultMode": "SAFE",
    "allowedTransitions": {
        "OFFLINE": ["OFFLINE", "SAFE"],
        "SAFE": ["SAFE", "SUPERVISED"],
        "SUPERVISED": ["SUPERVISED", "SAFE", "AUTONOMOUS"],
        "AUTONOMOUS": ["AUTONOMOUS", "SUPERVISED", "SAFE"],
        "SELF_EVOLUTION": []
    },
    "downgradeTriggers": {
        "policyViolation": "SAFE",
        "unexpectedDrift": "SUPERVISED",
        "ciInstability": "SAFE"
    },
    "requireExplicitConfirmFor": ["AUTONOMOUS"]
}"#;

/// A resolve request asking to move from `current` to `requested`.
pub fn transition_request(current: RuntimeMode, requested: RuntimeMode) -> ResolveInput {
    ResolveInput {
        requested_mode: Some(requested),
        current_mode: Some(current),
        ..ResolveInput::default()
    }
}

/// A minimal approval input with a fixed request ID, so repeated
/// evaluations compare equal.
pub fn fixed_approval_input(run_id: &str, step: u32, category: StageCategory) -> ApprovalInput {
    let mut input = ApprovalInput::new(run_id, step, category);
    input.request_id = format!("req-{run_id}-{step}");
    input
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call from
/// every test; only the first call wins.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
