//! Error types for rolebind policy operations

use rolebind_core::StoreError;
use thiserror::Error;

/// Errors that can occur while adding or removing role subjects
#[derive(Error, Debug)]
pub enum PolicyError {
    /// A store call failed; the store's message is passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("role binding {binding} found for role {found}, not {requested}")]
    RoleRefMismatch {
        binding: String,
        found: String,
        requested: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PolicyError {
    /// Check if the error is a store not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Check if the error is a store conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_conflict())
    }

    /// Check if the caller may re-run the whole operation against fresh reads
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_retryable())
    }
}
