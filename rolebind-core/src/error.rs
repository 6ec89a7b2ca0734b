//! Error types for rolebind.
//!
//! Two layers live here. [`StoreError`] is the typed outcome of a store call
//! (not found, already exists, stale update) and is surfaced to callers
//! verbatim. [`Error`] covers model-level failures such as an unknown subject
//! kind and wraps [`StoreError`] for code that mixes both.
//!
//! # Examples
//!
//! ```rust
//! use rolebind_core::error::{Error, StoreError};
//! use rolebind_core::types::ObjectKind;
//!
//! fn lookup() -> rolebind_core::error::Result<()> {
//!     Err(StoreError::not_found(ObjectKind::RoleBinding, "edit").into())
//! }
//!
//! assert!(lookup().unwrap_err().is_not_found());
//! ```

use crate::types::ObjectKind;
use thiserror::Error;

/// Result type alias for rolebind model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Main error type for model-level operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A subject kind string could not be parsed.
    #[error("Invalid subject kind: {0}")]
    InvalidSubjectKind(String),

    /// A value violates a model constraint (empty names and the like).
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input/output error from the underlying system.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other error types.
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Typed failures returned by the backing store.
///
/// Every variant names the kind and name of the object involved so that the
/// message can be shown to an operator unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The object does not exist.
    #[error("{kind} \"{name}\" not found")]
    NotFound {
        /// Kind of the missing object.
        kind: ObjectKind,
        /// Name of the missing object.
        name: String,
    },

    /// An object with the same name already exists.
    #[error("{kind} \"{name}\" already exists")]
    AlreadyExists {
        /// Kind of the colliding object.
        kind: ObjectKind,
        /// Name of the colliding object.
        name: String,
    },

    /// The update was based on a stale read.
    #[error("operation cannot be fulfilled on {kind} \"{name}\": {reason}")]
    Conflict {
        /// Kind of the contended object.
        kind: ObjectKind,
        /// Name of the contended object.
        name: String,
        /// Store-provided explanation.
        reason: String,
    },

    /// The object was rejected by store-side validation.
    #[error("{kind} \"{name}\" is invalid: {reason}")]
    Invalid {
        /// Kind of the rejected object.
        kind: ObjectKind,
        /// Name of the rejected object.
        name: String,
        /// Validation failure.
        reason: String,
    },

    /// The store could not be reached or refused the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create a not found error.
    pub fn not_found(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create an already exists error.
    pub fn already_exists(kind: ObjectKind, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(kind: ObjectKind, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid object error.
    pub fn invalid(kind: ObjectKind, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an already exists error.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if re-running the whole read-modify-write sequence may succeed.
    ///
    /// Creation races and stale updates are retryable. A missing object is
    /// not: re-reading will not make it appear.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rolebind_core::error::StoreError;
    /// use rolebind_core::types::ObjectKind;
    ///
    /// let stale = StoreError::conflict(ObjectKind::RoleBinding, "edit", "modified");
    /// assert!(stale.is_retryable());
    ///
    /// let missing = StoreError::not_found(ObjectKind::RoleBinding, "edit");
    /// assert!(!missing.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::AlreadyExists { .. } => true,
            Self::Conflict { .. } => true,
            Self::Invalid { .. } => false,
            Self::Unavailable(_) => true,
        }
    }
}

impl Error {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if the error is a store not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}
