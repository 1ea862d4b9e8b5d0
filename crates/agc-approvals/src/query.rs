//! Read-side lookups over cached decisions
//!
//! Thin helpers over [`DecisionCache`] that share [`DecisionKey`] with
//! the evaluator, so reads and writes can never disagree on
//! addressing. Reads are best-effort: an absent decision may simply
//! have aged out.

use crate::cache::DecisionCache;
use crate::key::DecisionKey;
use crate::packet::{ApprovalPacket, StageCategory};

/// Every live decision for `run_id`, ordered by step, then by category
/// name for decisions sharing a step.
pub fn approvals_for_run(cache: &mut DecisionCache, run_id: &str) -> Vec<ApprovalPacket> {
    let mut packets: Vec<ApprovalPacket> = cache
        .get_all()
        .into_iter()
        .filter(|packet| packet.run_id == run_id)
        .collect();
    packets.sort_by(|a, b| {
        a.step
            .cmp(&b.step)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    packets
}

/// The live decision for one `(run, step, category)`, if any.
///
/// A hit counts as a read and refreshes the entry's lifetime.
pub fn approval_for_step(
    cache: &mut DecisionCache,
    run_id: &str,
    step: u32,
    category: StageCategory,
) -> Option<ApprovalPacket> {
    cache.get(&DecisionKey::new(run_id, step, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{normalize, ApprovalInput};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn seeded_cache() -> DecisionCache {
        let mut cache = DecisionCache::new(32, Duration::from_secs(3600));
        for (run, step, category) in [
            ("run-a", 3, StageCategory::Tester),
            ("run-b", 1, StageCategory::Planner),
            ("run-a", 1, StageCategory::Tester),
            ("run-a", 1, StageCategory::Builder),
            ("run-a", 2, StageCategory::Builder),
        ] {
            let packet = normalize(ApprovalInput::new(run, step, category));
            cache.save(DecisionKey::for_packet(&packet), packet);
        }
        cache
    }

    #[test]
    fn run_lookup_filters_and_orders_by_step_then_category() {
        let mut cache = seeded_cache();
        let packets = approvals_for_run(&mut cache, "run-a");

        let shape: Vec<(u32, StageCategory)> = packets
            .iter()
            .map(|packet| (packet.step, packet.category))
            .collect();
        assert_eq!(
            shape,
            vec![
                (1, StageCategory::Builder),
                (1, StageCategory::Tester),
                (2, StageCategory::Builder),
                (3, StageCategory::Tester),
            ]
        );
    }

    #[test]
    fn run_lookup_on_an_unknown_run_is_empty() {
        let mut cache = seeded_cache();
        assert!(approvals_for_run(&mut cache, "run-z").is_empty());
    }

    #[test]
    fn step_lookup_hits_the_exact_decision() {
        let mut cache = seeded_cache();

        let hit = approval_for_step(&mut cache, "run-a", 2, StageCategory::Builder);
        assert_eq!(hit.map(|p| (p.run_id, p.step)), Some(("run-a".to_string(), 2)));

        assert!(approval_for_step(&mut cache, "run-a", 2, StageCategory::Tester).is_none());
        assert!(approval_for_step(&mut cache, "run-a", 9, StageCategory::Builder).is_none());
    }
}
