//! # rolebind
//!
//! Add and remove subjects from role bindings, at cluster or namespace scope.
//!
//! This crate re-exports the functionality of the constituent crates:
//! - `rolebind-core`: binding model, subject set arithmetic and errors
//! - `rolebind-store`: store client interface, in-memory store and scoped accessors
//! - `rolebind-policy`: binding resolution and the add/remove orchestrator

pub use rolebind_core as core;
pub use rolebind_policy as policy;
pub use rolebind_store as store;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::policy::prelude::*;
}
