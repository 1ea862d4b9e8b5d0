//! Governance context
//!
//! One explicitly-constructed value bundling the three governance
//! concerns: the mode policy, the approval evaluator, and the decision
//! cache. Callers create and pass a context; there is no process-wide
//! instance, so tests and embedders can run any number of isolated
//! contexts side by side.
//!
//! The cache sits behind a mutex because reads refresh entry
//! timestamps; every cache operation is a short critical section with
//! no user code inside it.

use crate::error::GovernanceError;
use agc_approvals::cache::DecisionCache;
use agc_approvals::{
    approval_for_step, approvals_for_run, ApprovalEvaluator, ApprovalInput, ApprovalPacket,
    CacheSnapshotEntry, RuleEngine, StageCategory, StageRiskRules,
};
use agc_mode::{
    check_permission, env_mode_override, resolve, GuardAction, ModeConfig, PermissionDecision,
    ResolveInput, ResolveResult, RuntimeMode,
};
use parking_lot::Mutex;
use std::path::Path;

/// The governance facade.
#[derive(Debug)]
pub struct GovernanceContext<E: RuleEngine = StageRiskRules> {
    config: ModeConfig,
    evaluator: ApprovalEvaluator<E>,
    cache: Mutex<DecisionCache>,
}

impl GovernanceContext<StageRiskRules> {
    /// Context over `config` with the default rule engine and cache
    /// bounds.
    #[must_use]
    pub fn new(config: ModeConfig) -> Self {
        Self::with_engine(config, StageRiskRules)
    }

    /// Context loading its mode policy from a JSON document.
    ///
    /// # Errors
    /// [`GovernanceError::ModeConfig`] when the document is missing or
    /// malformed.
    pub fn from_policy_path(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        Ok(Self::new(ModeConfig::from_path(path)?))
    }
}

impl<E: RuleEngine> GovernanceContext<E> {
    /// Context over a custom rule engine.
    #[must_use]
    pub fn with_engine(config: ModeConfig, engine: E) -> Self {
        Self {
            config,
            evaluator: ApprovalEvaluator::with_engine(engine),
            cache: Mutex::new(DecisionCache::default()),
        }
    }

    /// Replace the decision cache (custom bounds or clock).
    #[must_use]
    pub fn with_cache(mut self, cache: DecisionCache) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    /// The mode policy in use.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Resolve the runtime mode for one request. When the caller has
    /// not supplied an environment override, the process environment is
    /// consulted.
    #[must_use]
    pub fn resolve_mode(&self, mut input: ResolveInput) -> ResolveResult {
        if input.env_mode.is_none() {
            input.env_mode = env_mode_override();
        }
        resolve(&input, &self.config)
    }

    /// Check whether `action` is permitted at `mode`.
    #[must_use]
    pub fn check_permission(&self, mode: RuntimeMode, action: GuardAction) -> PermissionDecision {
        check_permission(mode, action)
    }

    /// Run the approval pipeline and cache the decision.
    ///
    /// # Errors
    /// [`GovernanceError::Approval`] when the input (or the merged
    /// packet) fails structural validation.
    pub fn evaluate_approval(
        &self,
        input: ApprovalInput,
    ) -> Result<ApprovalPacket, GovernanceError> {
        let mut cache = self.cache.lock();
        Ok(self.evaluator.evaluate(&mut cache, input)?)
    }

    /// Every live decision for `run_id`, ordered by step then category.
    #[must_use]
    pub fn approvals_for_run(&self, run_id: &str) -> Vec<ApprovalPacket> {
        approvals_for_run(&mut self.cache.lock(), run_id)
    }

    /// The live decision for one `(run, step, category)`, if any.
    #[must_use]
    pub fn approval_for_step(
        &self,
        run_id: &str,
        step: u32,
        category: StageCategory,
    ) -> Option<ApprovalPacket> {
        approval_for_step(&mut self.cache.lock(), run_id, step, category)
    }

    /// Number of live cached decisions.
    #[must_use]
    pub fn decision_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// All live cached decisions with their ages, oldest-first.
    #[must_use]
    pub fn decision_snapshot(&self) -> Vec<CacheSnapshotEntry> {
        self.cache.lock().snapshot()
    }

    /// Drop every cached decision.
    pub fn clear_decisions(&self) {
        self.cache.lock().clear();
    }
}
