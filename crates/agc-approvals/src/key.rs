//! Deterministic decision addressing
//!
//! One stable, collision-free key per `(run, step, category)`, shared
//! by the evaluator and the query layer so the format cannot drift
//! between them.

use crate::packet::{ApprovalPacket, StageCategory};
use std::fmt;

/// Cache key for a decision: `"{run_id}:{step}:{category}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecisionKey(String);

impl DecisionKey {
    /// Build the key for `(run_id, step, category)`.
    #[must_use]
    pub fn new(run_id: &str, step: u32, category: StageCategory) -> Self {
        Self(format!("{run_id}:{step}:{category}"))
    }

    /// The key addressing `packet`.
    #[must_use]
    pub fn for_packet(packet: &ApprovalPacket) -> Self {
        Self::new(&packet.run_id, packet.step, packet.category)
    }

    /// The key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
