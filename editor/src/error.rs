//! Editor error taxonomy.
//!
//! Each error maps to one [`ErrorKind`] the UI reacts to: guard violations and
//! missing preconditions become a blocking message, a confirmation request
//! becomes a yes/no prompt, storage failures are reported as-is.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

use crate::store::StorageError;

/// Stable code for an error, suitable for logs and UI lookups.
pub trait ErrorCode: fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// State an operation needs but was not there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    ActiveBaseMap,
    CurrentEventMap,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveBaseMap => f.write_str("select or create a base map first"),
            Self::CurrentEventMap => f.write_str("create or load an event map first"),
        }
    }
}

/// Coarse classification of an [`EditorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    GuardViolation,
    ConfirmationRequired,
    PreconditionMissing,
    NotFound,
    InvalidInput,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("category {name:?} is used by {pois} point(s) of interest and cannot be deleted")]
    CategoryInUse { id: String, name: String, pois: usize },
    #[error("base map {name:?} is used by {event_maps} event map(s) and cannot be deleted")]
    BaseMapInUse { id: String, name: String, event_maps: usize },
    #[error("{name:?} is placed {placements} time(s); removing it also removes those placements")]
    ConfirmationRequired { id: String, name: String, placements: usize },
    #[error("{0}")]
    PreconditionMissing(Precondition),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl EditorError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CategoryInUse { .. } | Self::BaseMapInUse { .. } => ErrorKind::GuardViolation,
            Self::ConfirmationRequired { .. } => ErrorKind::ConfirmationRequired,
            Self::PreconditionMissing(_) => ErrorKind::PreconditionMissing,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound { kind, id: id.to_owned() }
    }
}

impl ErrorCode for EditorError {
    fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::GuardViolation => "E_GUARD_VIOLATION",
            ErrorKind::ConfirmationRequired => "E_CONFIRMATION_REQUIRED",
            ErrorKind::PreconditionMissing => "E_PRECONDITION_MISSING",
            ErrorKind::NotFound => "E_NOT_FOUND",
            ErrorKind::InvalidInput => "E_INVALID_INPUT",
            ErrorKind::Storage => "E_STORAGE",
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
