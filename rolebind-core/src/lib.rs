//! # rolebind core
//!
//! Core types and pure logic for adding and removing subjects from role
//! bindings.
//!
//! This crate holds the pieces every other rolebind crate builds on:
//! - [`types`]: roles, role bindings, subjects, scopes and object metadata
//! - [`subject_set`]: order-preserving merge and subtract over subject lists
//! - [`error`]: the store error taxonomy and the model error type
//!
//! ## API Stability
//!
//! **Current Status: EXPERIMENTAL (v0.x.x)**
//!
//! During the 0.x.x series minor version bumps may include breaking changes.

#![warn(missing_docs)]

pub mod error;
pub mod subject_set;
pub mod types;

pub use error::{Error, Result, StoreError, StoreResult};
pub use types::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result, StoreError, StoreResult};
    pub use crate::subject_set::{merge, subtract};
    pub use crate::types::*;
}
