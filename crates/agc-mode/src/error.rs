//! Error types for the runtime-mode subsystem.

use std::path::PathBuf;

/// Failure to load the runtime-mode policy document.
///
/// There is deliberately no fallback configuration: a missing policy is
/// itself a policy failure, and resolution must not proceed with an
/// unknown policy.
#[derive(Debug, thiserror::Error)]
pub enum ModeConfigError {
    /// Policy document could not be read.
    #[error("failed to read runtime-mode policy at {path}: {source}")]
    Io {
        /// Path of the policy document.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid JSON for [`crate::ModeConfig`].
    #[error("failed to parse runtime-mode policy at {path}: {source}")]
    Parse {
        /// Path of the policy document.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A string did not name a known runtime mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown runtime mode: {0:?}")]
pub struct ParseModeError(pub String);
