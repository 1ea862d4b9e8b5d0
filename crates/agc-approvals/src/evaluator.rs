//! Approval evaluator
//!
//! The fixed pipeline that turns loose stage input into a cached
//! decision: normalize, validate, apply rules, merge, re-validate,
//! cache. Every decision that reaches a caller has passed through this
//! path, so the cache only ever holds well-formed packets.

use crate::cache::DecisionCache;
use crate::error::ApprovalError;
use crate::key::DecisionKey;
use crate::packet::{assert_valid, normalize, validate, ApprovalInput, ApprovalPacket};
use crate::rules::{RuleEngine, StageRiskRules};
use tracing::info;

/// Deterministic approval pipeline over a pluggable rule engine.
#[derive(Debug, Clone, Default)]
pub struct ApprovalEvaluator<E: RuleEngine = StageRiskRules> {
    engine: E,
}

impl ApprovalEvaluator<StageRiskRules> {
    /// Evaluator with the default stage-risk rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: RuleEngine> ApprovalEvaluator<E> {
    /// Evaluator over a custom rule engine.
    #[must_use]
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// The engine in use.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run the full pipeline for one stage request and cache the
    /// resulting decision.
    ///
    /// The rule engine is authoritative: its risk, reasons, and hints
    /// replace whatever the caller supplied. A caller's suggested risk
    /// influences only the normalized defaults (notably
    /// `requires_human`), never the final level. `requires_human` is
    /// the OR of the caller's assertion and the final-risk escalation,
    /// so a caller can demand review but never waive it.
    ///
    /// # Errors
    /// [`ApprovalError::InvalidPacket`] when the input fails structural
    /// validation; [`ApprovalError::RuleContract`] when the merged
    /// packet does (an engine defect).
    pub fn evaluate(
        &self,
        cache: &mut DecisionCache,
        input: ApprovalInput,
    ) -> Result<ApprovalPacket, ApprovalError> {
        let base = normalize(input);
        assert_valid(&base)?;

        let outcome = self.engine.evaluate(&base);

        let mut packet = base;
        packet.risk = outcome.risk;
        packet.requires_human = packet.requires_human || outcome.risk.is_high();
        packet.suggested_action = outcome.risk.suggested_action();
        packet.reasons = outcome.reasons;
        packet.hints = outcome.hints;

        let report = validate(&packet);
        if !report.is_ok() {
            return Err(ApprovalError::RuleContract(report.errors));
        }

        let key = DecisionKey::for_packet(&packet);
        info!(
            %key,
            engine = self.engine.name(),
            risk = %packet.risk,
            requires_human = packet.requires_human,
            action = %packet.suggested_action,
            "approval decision"
        );
        cache.save(key, packet.clone());
        Ok(packet)
    }
}
