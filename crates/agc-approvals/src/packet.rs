//! Approval packet: canonical decision record, normalizer, validator
//!
//! Stages supply an [`ApprovalInput`] — identity and category plus
//! whatever else they know. [`normalize`] turns that into a
//! fully-populated [`ApprovalPacket`]; [`validate`] checks the
//! structural invariants the type system cannot express.

use crate::error::ApprovalError;
use crate::payload::StagePayload;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Risk level of a proposed action, ordered for rule escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalRisk {
    /// Proceed without review.
    Low,
    /// Worth revising before proceeding.
    Medium,
    /// A human must be involved.
    High,
}

impl ApprovalRisk {
    /// The fixed risk → action mapping: low → auto-approve,
    /// medium → revise, high → ask-human.
    #[inline]
    #[must_use]
    pub const fn suggested_action(self) -> SuggestedAction {
        match self {
            Self::Low => SuggestedAction::AutoApprove,
            Self::Medium => SuggestedAction::Revise,
            Self::High => SuggestedAction::AskHuman,
        }
    }

    /// Canonical wire name (lowercase).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Whether this is the highest level.
    #[inline]
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for ApprovalRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage that emitted a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageCategory {
    /// Plan stage.
    Planner,
    /// Build stage.
    Builder,
    /// Test stage.
    Tester,
    /// Release stage.
    Release,
}

impl StageCategory {
    /// Every stage category, for sweeps.
    pub const ALL: [Self; 4] = [Self::Planner, Self::Builder, Self::Tester, Self::Release];

    /// Canonical wire name (lowercase).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planner => "planner",
            Self::Builder => "builder",
            Self::Tester => "tester",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for StageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The engine's recommended next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestedAction {
    /// Proceed without human involvement.
    AutoApprove,
    /// Do not proceed.
    Reject,
    /// Rework the proposal and re-evaluate.
    Revise,
    /// Escalate to a human reviewer.
    AskHuman,
}

impl SuggestedAction {
    /// Canonical wire name (kebab-case).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoApprove => "auto-approve",
            Self::Reject => "reject",
            Self::Revise => "revise",
            Self::AskHuman => "ask-human",
        }
    }
}

impl fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, validated record of one risk decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPacket {
    /// Unique ID for this approval request (per step).
    pub request_id: String,
    /// Orchestrator run identifier.
    pub run_id: String,
    /// Step number within the run (1-based).
    pub step: u32,
    /// Which stage emitted this packet.
    pub category: StageCategory,
    /// Computed risk level after rules are applied.
    pub risk: ApprovalRisk,
    /// Whether a human must be involved before proceeding.
    pub requires_human: bool,
    /// Machine-readable reasons explaining the decision.
    pub reasons: Vec<String>,
    /// Hints for UIs and logs (what to check, how to improve).
    pub hints: Vec<String>,
    /// Stage-specific description of the action.
    #[serde(default)]
    pub payload: StagePayload,
    /// The engine's recommended next action.
    pub suggested_action: SuggestedAction,
}

/// A string or a list of strings; stages are sloppy about which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single entry.
    One(String),
    /// Zero or more entries.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flatten into a clean list: entries trimmed, blanks dropped.
    #[must_use]
    pub fn into_clean_vec(self) -> Vec<String> {
        let items = match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

/// Loosely-shaped input a stage supplies before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalInput {
    /// Unique ID for this approval request.
    pub request_id: String,
    /// Orchestrator run identifier.
    pub run_id: String,
    /// Step number within the run (1-based).
    pub step: u32,
    /// Which stage is asking.
    pub category: StageCategory,
    /// Stage-specific payload, if the stage has one.
    #[serde(default)]
    pub payload: Option<StagePayload>,
    /// Caller-suggested risk; the rule engine has the final say.
    #[serde(default)]
    pub risk: Option<ApprovalRisk>,
    /// Caller-asserted human requirement; only ever strengthened.
    #[serde(default)]
    pub requires_human: Option<bool>,
    /// Caller-supplied reasons.
    #[serde(default)]
    pub reasons: OneOrMany,
    /// Caller-supplied hints.
    #[serde(default)]
    pub hints: OneOrMany,
    /// Caller-suggested action; recomputed from final risk.
    #[serde(default)]
    pub suggested_action: Option<SuggestedAction>,
}

impl ApprovalInput {
    /// Minimal input with a generated request ID.
    #[must_use]
    pub fn new(run_id: impl Into<String>, step: u32, category: StageCategory) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            run_id: run_id.into(),
            step,
            category,
            payload: None,
            risk: None,
            requires_human: None,
            reasons: OneOrMany::default(),
            hints: OneOrMany::default(),
            suggested_action: None,
        }
    }

    /// Attach a stage payload.
    #[must_use]
    pub fn with_payload(mut self, payload: StagePayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Suggest a risk level.
    #[must_use]
    pub fn with_risk(mut self, risk: ApprovalRisk) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Assert that a human must review this action.
    #[must_use]
    pub fn with_requires_human(mut self, requires_human: bool) -> Self {
        self.requires_human = Some(requires_human);
        self
    }
}

/// Normalize loose input into a fully-populated packet.
///
/// Guarantees: risk defaults to low; reasons/hints are clean lists;
/// `suggested_action` is consistent with risk unless explicitly set;
/// `requires_human` defaults from risk; payload defaults to `Empty`.
#[must_use]
pub fn normalize(input: ApprovalInput) -> ApprovalPacket {
    let risk = input.risk.unwrap_or(ApprovalRisk::Low);
    let suggested_action = input
        .suggested_action
        .unwrap_or_else(|| risk.suggested_action());
    let requires_human = input
        .requires_human
        .unwrap_or(risk == ApprovalRisk::High);

    ApprovalPacket {
        request_id: input.request_id,
        run_id: input.run_id,
        step: input.step,
        category: input.category,
        risk,
        requires_human,
        reasons: input.reasons.into_clean_vec(),
        hints: input.hints.into_clean_vec(),
        payload: input.payload.unwrap_or_default(),
        suggested_action,
    }
}

/// Outcome of structural validation; collects every detected issue
/// instead of stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Detected issues; empty means the packet is well-formed.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Whether the packet passed every check.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Structural checks over a packet.
///
/// The closed enums make most of the historical checks (category, risk,
/// action membership; list-ness of reasons/hints) unrepresentable;
/// what remains is identity, step positivity, and payload/category
/// agreement.
#[must_use]
pub fn validate(packet: &ApprovalPacket) -> ValidationReport {
    let mut errors = Vec::new();

    if packet.request_id.trim().is_empty() {
        errors.push("requestId must be a non-empty string".to_string());
    }
    if packet.run_id.trim().is_empty() {
        errors.push("runId must be a non-empty string".to_string());
    }
    if packet.step == 0 {
        errors.push("step must be a positive integer".to_string());
    }
    if !packet.payload.matches_category(packet.category) {
        errors.push(format!(
            "payload kind \"{}\" does not match category \"{}\"",
            packet.payload.kind(),
            packet.category
        ));
    }

    ValidationReport { errors }
}

/// Strict variant of [`validate`]: errors on the first invalid packet.
///
/// Reserved for boundary defense — after rule merging, a violation
/// indicates a programming error, not bad external input.
///
/// # Errors
/// [`ApprovalError::InvalidPacket`] with every detected issue.
pub fn assert_valid(packet: &ApprovalPacket) -> Result<(), ApprovalError> {
    let report = validate(packet);
    if report.is_ok() {
        Ok(())
    } else {
        Err(ApprovalError::InvalidPacket(report.errors))
    }
}
