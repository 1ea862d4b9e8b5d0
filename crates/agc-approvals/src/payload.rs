//! Stage-specific payloads
//!
//! A closed, `kind`-tagged set of payload shapes, one per pipeline
//! stage, instead of an open map: the rule engine pattern-matches these
//! safely rather than probing unknown fields. `Empty` is the default
//! and is compatible with every category; a non-empty payload must
//! match its packet's category (checked by
//! [`crate::packet::validate`]).

use crate::packet::StageCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage-supplied description of the action under evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum StagePayload {
    /// No payload supplied.
    #[default]
    Empty,
    /// A planner proposing a plan.
    Planner {
        /// What the plan sets out to achieve.
        objective: String,
        /// Number of steps the plan contains.
        #[serde(default)]
        planned_steps: u32,
    },
    /// A builder proposing a change.
    Builder {
        /// The kind of change.
        operation: BuildOperation,
        /// Files or resources the change touches.
        #[serde(default)]
        targets: Vec<String>,
    },
    /// A tester reporting a verification pass.
    Tester {
        /// Test suite being run.
        suite: String,
        /// Currently failing cases in that suite.
        #[serde(default)]
        failing_cases: u32,
    },
    /// A release stage proposing a promotion.
    Release {
        /// Artifact being released.
        artifact: String,
        /// Target environment.
        environment: ReleaseEnvironment,
        /// Whether the release can be rolled back.
        #[serde(default)]
        rollback_available: bool,
    },
}

impl StagePayload {
    /// The `kind` tag of this payload.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Planner { .. } => "planner",
            Self::Builder { .. } => "builder",
            Self::Tester { .. } => "tester",
            Self::Release { .. } => "release",
        }
    }

    /// Whether this payload may accompany a packet of `category`.
    #[inline]
    #[must_use]
    pub const fn matches_category(&self, category: StageCategory) -> bool {
        matches!(
            (self, category),
            (Self::Empty, _)
                | (Self::Planner { .. }, StageCategory::Planner)
                | (Self::Builder { .. }, StageCategory::Builder)
                | (Self::Tester { .. }, StageCategory::Tester)
                | (Self::Release { .. }, StageCategory::Release)
        )
    }
}

/// Kinds of change a builder stage can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildOperation {
    /// Add a new file.
    CreateFile,
    /// Edit an existing file.
    ModifyFile,
    /// Remove a file.
    DeleteFile,
    /// Execute an arbitrary command.
    RunCommand,
    /// Add, remove, or bump a dependency.
    DependencyChange,
}

impl BuildOperation {
    /// Operations that destroy state or escape the managed tree.
    #[inline]
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::DeleteFile | Self::RunCommand)
    }

    /// Canonical wire name (kebab-case).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateFile => "create-file",
            Self::ModifyFile => "modify-file",
            Self::DeleteFile => "delete-file",
            Self::RunCommand => "run-command",
            Self::DependencyChange => "dependency-change",
        }
    }
}

impl fmt::Display for BuildOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target environment of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseEnvironment {
    /// Pre-production environment.
    Staging,
    /// Production environment.
    Production,
}
