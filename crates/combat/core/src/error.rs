//! Common error infrastructure for combat-core.
//!
//! Domain errors (`IntakeError`, `EquipError`, `Unavailable`) live next to the
//! operations that produce them. This module provides the shared severity
//! classification every one of them reports.
//!
//! # Design Principles
//!
//! - **Never thrown across the tick loop**: rejected input becomes a `false`
//!   return plus a combat log line
//! - **Severity Classification**: callers pick a handling strategy per error
//! - **Stable codes**: each variant exposes a string code for metrics and tests

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed on a later tick.
    ///
    /// Examples: action on cooldown, insufficient mana
    Recoverable,

    /// Invalid input that will not succeed without changes.
    ///
    /// Examples: unknown action, skill locked behind a module tier
    Validation,

    /// Unexpected state inconsistency. Should be unreachable by construction.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
