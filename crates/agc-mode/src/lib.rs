//! Runtime-mode subsystem for AGC
//!
//! Decides what level of autonomy the orchestrator currently has and
//! whether a specific action kind is permitted at that level:
//!
//! - [`ModeConfig`] — static policy document (allowed transitions,
//!   downgrade triggers, confirmation requirements)
//! - [`resolve`] — pure, fail-safe mode resolution
//! - [`check_permission`] — per-mode capability guard
//!
//! # Safety posture
//! The resolver and guard never fail: any ambiguity, missing data, or
//! disallowed transition degrades to the least-privileged outcome
//! (SAFE / deny), never to a more permissive one. The locked
//! `SELF_EVOLUTION` level is accepted as input everywhere and returned
//! nowhere — [`ActiveMode`] makes the illegal resolved state
//! unrepresentable.

pub mod config;
pub mod error;
pub mod permissions;
pub mod resolver;
pub mod types;

pub use config::ModeConfig;
pub use error::{ModeConfigError, ParseModeError};
pub use permissions::{
    capabilities_for, check_permission, GuardAction, ModeCapabilities, PermissionDecision,
};
pub use resolver::{env_mode_override, resolve, RUNTIME_MODE_ENV};
pub use types::{ActiveMode, ResolveInput, ResolveResult, RuntimeMode};
