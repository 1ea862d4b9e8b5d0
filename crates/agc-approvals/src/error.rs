//! Error types for the approval subsystem.

/// Failures of the approval pipeline.
///
/// Permission denials and risk verdicts are data, not errors; these
/// variants cover only structural contract violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    /// Caller-supplied input failed structural validation.
    #[error("invalid approval packet: {}", .0.join(" | "))]
    InvalidPacket(Vec<String>),

    /// The merged packet failed validation after rules were applied.
    /// This indicates a rule-engine defect, not bad external input; a
    /// malformed decision must never be silently cached.
    #[error("rule engine produced an invalid packet: {}", .0.join(" | "))]
    RuleContract(Vec<String>),
}
