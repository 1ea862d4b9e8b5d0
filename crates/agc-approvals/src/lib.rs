//! Approval subsystem for AGC
//!
//! Converts loosely-shaped, stage-supplied action descriptions into
//! canonical, validated decision records, scores them with a
//! deterministic rule engine, and keeps the most recent decision per
//! `(run, step, category)` in a bounded in-memory cache.
//!
//! Pipeline (see [`ApprovalEvaluator::evaluate`]): normalize →
//! validate → rules → coherence merge → re-validate → cache upsert.
//! The rule engine is authoritative for risk, and the pipeline is
//! deterministic: identical input yields an identical decision.
//!
//! The cache is a development-grade, single-process store with no
//! durability and no cross-process consistency; multi-instance
//! deployments must swap in a shared backing store behind the same
//! calling contract.

pub mod cache;
pub mod error;
pub mod evaluator;
pub mod key;
pub mod packet;
pub mod payload;
pub mod query;
pub mod rules;

pub use cache::{CacheSnapshotEntry, Clock, DecisionCache, SystemClock};
pub use error::ApprovalError;
pub use evaluator::ApprovalEvaluator;
pub use key::DecisionKey;
pub use packet::{
    assert_valid, normalize, validate, ApprovalInput, ApprovalPacket, ApprovalRisk, OneOrMany,
    StageCategory, SuggestedAction, ValidationReport,
};
pub use payload::{BuildOperation, ReleaseEnvironment, StagePayload};
pub use query::{approval_for_step, approvals_for_run};
pub use rules::{RuleEngine, RuleOutcome, StageRiskRules};
