//! Common error infrastructure for bout-core.
//!
//! Every failure the core can report is a [`MatchError`]. Errors are raised
//! before any state is touched: a rejected call leaves the caller's
//! [`MatchState`](crate::MatchState) exactly as it was.
//!
//! # Design Principles
//!
//! - **Explicit results**: nothing is swallowed or defaulted
//! - **Severity Classification**: errors are categorized for caller handling
//! - **Stable codes**: each variant exposes a string code for logs and metrics

use crate::state::MatchId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (e.g. after a retry)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable, the value cannot be used at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all bout-core errors.
///
/// Provides a uniform interface for error classification across crates that
/// wrap core errors (the runtime maps these onto its own error type).
pub trait BoutError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by match construction, action submission, ticking and
/// snapshot reconstruction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// The symbolic action name is not part of the action roster.
    #[error("unknown action '{name}'")]
    UnknownAction { name: String },

    /// An action was submitted to a match that has already ended.
    #[error("match {match_id} is over and no longer accepts actions")]
    MatchNotActive { match_id: MatchId },

    /// A configuration value is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },

    /// Persisted data cannot be turned back into a valid match.
    #[error("snapshot does not describe a valid match: {reason}")]
    DeserializationMismatch { reason: String },

    /// A pending action handle was issued for a different match.
    #[error("pending action belongs to match {found}, not {expected}")]
    ActionMatchMismatch { expected: MatchId, found: MatchId },

    /// The elapsed time passed to a tick is negative or not finite.
    #[error("elapsed time must be a finite, non-negative number of seconds (got {elapsed})")]
    InvalidElapsedTime { elapsed: f64 },
}

impl MatchError {
    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        Self::DeserializationMismatch {
            reason: reason.into(),
        }
    }

    pub(crate) const fn config(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfiguration { field, reason }
    }
}

impl BoutError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        use MatchError::*;
        match self {
            UnknownAction { .. } | MatchNotActive { .. } | InvalidElapsedTime { .. } => {
                ErrorSeverity::Validation
            }
            ActionMatchMismatch { .. } => ErrorSeverity::Internal,
            InvalidConfiguration { .. } | DeserializationMismatch { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use MatchError::*;
        match self {
            UnknownAction { .. } => "MATCH_UNKNOWN_ACTION",
            MatchNotActive { .. } => "MATCH_NOT_ACTIVE",
            InvalidConfiguration { .. } => "MATCH_INVALID_CONFIGURATION",
            DeserializationMismatch { .. } => "MATCH_DESERIALIZATION_MISMATCH",
            ActionMatchMismatch { .. } => "MATCH_ACTION_MISMATCH",
            InvalidElapsedTime { .. } => "MATCH_INVALID_ELAPSED_TIME",
        }
    }
}
