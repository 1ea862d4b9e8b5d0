//! Workspace-level error type.

use agc_approvals::ApprovalError;
use agc_mode::ModeConfigError;

/// Any failure surfaced by the governance facade.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    /// The mode policy document could not be loaded.
    #[error(transparent)]
    ModeConfig(#[from] ModeConfigError),

    /// The approval pipeline rejected a request.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
}
