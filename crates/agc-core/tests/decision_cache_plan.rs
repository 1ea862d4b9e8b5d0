//! Functional tests for decision-cache bounds through the facade.
//!
//! Bounds are driven with an injected manual clock, so expiry is exact
//! rather than wall-clock dependent.

use agc_core::{ApprovalInput, DecisionCache, GovernanceContext, StageCategory};
use agc_test_utils::{init_test_tracing, sample_mode_config, ManualClock};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn bounded_context(
    max_items: usize,
    ttl: Duration,
) -> (GovernanceContext, Arc<ManualClock>) {
    init_test_tracing();
    let clock = Arc::new(ManualClock::new());
    let cache = DecisionCache::with_clock(max_items, ttl, clock.clone());
    let ctx = GovernanceContext::new(sample_mode_config()).with_cache(cache);
    (ctx, clock)
}

fn approve(ctx: &GovernanceContext, run: &str, step: u32) {
    ctx.evaluate_approval(ApprovalInput::new(run, step, StageCategory::Builder))
        .unwrap();
}

/// Tenet: decisions age out after the configured lifetime.
#[test]
fn decisions_expire_after_the_lifetime() {
    let ttl = Duration::from_secs(60);
    let (ctx, clock) = bounded_context(10, ttl);
    approve(&ctx, "run-1", 1);

    clock.advance(ttl + Duration::from_millis(1));
    assert!(ctx
        .approval_for_step("run-1", 1, StageCategory::Builder)
        .is_none());
    assert_eq!(ctx.decision_count(), 0);
}

/// Tenet: a read within the lifetime refreshes a decision.
#[test]
fn reads_extend_a_decisions_life() {
    let ttl = Duration::from_secs(60);
    let (ctx, clock) = bounded_context(10, ttl);
    approve(&ctx, "run-1", 1);

    for _ in 0..3 {
        clock.advance(ttl - Duration::from_millis(1));
        assert!(ctx
            .approval_for_step("run-1", 1, StageCategory::Builder)
            .is_some());
    }
}

/// Tenet: the cache never exceeds its capacity, evicting oldest-first.
#[test]
fn capacity_bound_holds_under_a_burst_of_decisions() {
    let (ctx, clock) = bounded_context(5, Duration::from_secs(3600));
    for step in 1..=20 {
        approve(&ctx, "run-1", step);
        clock.advance(Duration::from_secs(1));
    }

    assert_eq!(ctx.decision_count(), 5);

    // Only the five newest steps survive.
    let steps: Vec<u32> = ctx
        .approvals_for_run("run-1")
        .into_iter()
        .map(|p| p.step)
        .collect();
    assert_eq!(steps, vec![16, 17, 18, 19, 20]);
}

/// Tenet: the snapshot reports ages and oldest-first ordering.
#[test]
fn snapshot_reports_ages_oldest_first() {
    let (ctx, clock) = bounded_context(10, Duration::from_secs(3600));
    approve(&ctx, "run-1", 1);
    clock.advance(Duration::from_secs(30));
    approve(&ctx, "run-1", 2);
    clock.advance(Duration::from_secs(10));

    let snapshot = ctx.decision_snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].age, Duration::from_secs(40));
    assert_eq!(snapshot[1].age, Duration::from_secs(10));
    assert!(snapshot[0].key.as_str().ends_with(":1:builder"));
}
