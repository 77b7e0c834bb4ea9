//! Common error infrastructure for farm-core.
//!
//! Domain-specific errors (`ExecuteError`, `OracleError`) live next to the
//! components that raise them. None of them ever escapes the orchestrator:
//! every failure path ends in a log line and a dropped or consumed request.
//! The shared [`FieldError`] trait gives those log lines a uniform severity and
//! a stable code.

/// Severity level of an error, used for categorization and log level.
///
/// - **Recoverable**: the world may allow the action later (crop not ripe yet)
/// - **Validation**: the request no longer matches the world (tile already tilled)
/// - **Internal**: collaborator state disagrees with itself
/// - **Fatal**: a collaborator is unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than a normal race.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all farm-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Codes are `SCREAMING_SNAKE_CASE` and never change once published
pub trait FieldError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
