//! Runtime-mode policy document
//!
//! The policy is a static JSON document describing the default mode,
//! which transitions are allowed, which named safety signals force a
//! downgrade, and which modes require an explicit confirmation to
//! enter. It is read synchronously at resolution time; a missing or
//! malformed document is a hard error, never a silent default.

use crate::error::ModeConfigError;
use crate::types::{ActiveMode, RuntimeMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The runtime-mode policy.
///
/// Type structure enforces the document invariants the original format
/// only documented: `default_mode` and every downgrade-trigger target
/// are [`ActiveMode`], so the locked level cannot be configured as a
/// destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    /// Mode used when neither caller nor environment supplies one.
    pub default_mode: ActiveMode,

    /// Adjacency map: each mode to the set of modes it may move to.
    /// A mode absent from the map allows no transitions away from it.
    #[serde(default)]
    pub allowed_transitions: BTreeMap<RuntimeMode, Vec<RuntimeMode>>,

    /// Named safety signal to the mode it forces.
    #[serde(default)]
    pub downgrade_triggers: BTreeMap<String, ActiveMode>,

    /// Modes that cannot be entered without an explicit confirmation.
    #[serde(default)]
    pub require_explicit_confirm_for: Vec<RuntimeMode>,

    /// Free-text operator notes; not interpreted.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,
}

impl ModeConfig {
    /// Read and parse the policy document at `path`.
    ///
    /// # Errors
    /// - [`ModeConfigError::Io`] if the document cannot be read
    /// - [`ModeConfigError::Parse`] if it is not a valid policy
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModeConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModeConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ModeConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a policy document from an in-memory JSON string.
    ///
    /// # Errors
    /// Returns the underlying parse failure for malformed documents.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Transitions allowed away from `mode` (empty when unlisted).
    #[inline]
    #[must_use]
    pub fn transitions_from(&self, mode: RuntimeMode) -> &[RuntimeMode] {
        self.allowed_transitions
            .get(&mode)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mode forced by the named trigger, if the policy knows it.
    #[inline]
    #[must_use]
    pub fn trigger_target(&self, trigger: &str) -> Option<ActiveMode> {
        self.downgrade_triggers.get(trigger).copied()
    }

    /// Whether entering `mode` requires an explicit confirmation.
    #[inline]
    #[must_use]
    pub fn requires_confirmation(&self, mode: RuntimeMode) -> bool {
        self.require_explicit_confirm_for.contains(&mode)
    }
}
