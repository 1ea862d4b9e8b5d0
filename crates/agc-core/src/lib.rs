//! AGC governance core
//!
//! The facade crate of the workspace. It re-exports the two
//! subsystems and binds them behind [`GovernanceContext`], the single
//! value an embedder threads through its call sites:
//!
//! - `agc-mode`: runtime-mode resolution and the per-mode permission
//!   guard
//! - `agc-approvals`: the approval pipeline and its bounded decision
//!   cache
//!
//! The two subsystems are deliberately independent; the context is
//! plumbing, not policy. A resolved mode gates *whether* an action may
//! run at all, an approval decision says *how much review* a specific
//! action needs, and callers consult both at their action boundaries.

pub mod context;
pub mod error;

pub use context::GovernanceContext;
pub use error::GovernanceError;

pub use agc_approvals::{
    approval_for_step, approvals_for_run, ApprovalError, ApprovalEvaluator, ApprovalInput,
    ApprovalPacket, ApprovalRisk, BuildOperation, CacheSnapshotEntry, DecisionCache, DecisionKey,
    ReleaseEnvironment, RuleEngine, RuleOutcome, StageCategory, StagePayload, StageRiskRules,
    SuggestedAction,
};
pub use agc_mode::{
    capabilities_for, check_permission, env_mode_override, resolve, ActiveMode, GuardAction,
    ModeCapabilities, ModeConfig, ModeConfigError, PermissionDecision, ResolveInput, ResolveResult,
    RuntimeMode, RUNTIME_MODE_ENV,
};
