//! Subject add/remove policy for rolebind
//!
//! This crate decides which role binding a grant or revocation lands on and
//! performs the read-modify-write against the store.
//!
//! # Features
//!
//! - **Scope independent**: one code path for cluster and namespace bindings
//! - **Conservative adds**: never guesses between several bindings for a role
//! - **Optimistic concurrency**: stale writes surface as `Conflict`
//! - **Advisory warnings**: granting a missing role succeeds with a warning
//! - **Dry run**: compute the resulting binding without writing it
//! - **Audit logging**: every persisted change is logged through `tracing`
//!
//! # Quick Start
//!
//! ```rust
//! use rolebind_policy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = InMemoryAuthorizationClient::builder()
//!         .with_cluster_role("edit")
//!         .build();
//!     let accessor = Arc::new(ClusterRoleBindingAccessor::new(Arc::new(client)));
//!
//!     let modifier = RoleModifier::builder(accessor)
//!         .with_audit_logging(true)
//!         .build();
//!
//!     let outcome = modifier
//!         .apply(&ModificationRequest::add("edit").with_users(["alice"]))
//!         .await?;
//!     assert_eq!(outcome.binding_name, "edit");
//!     assert_eq!(outcome.warning_message(), "");
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```rust
//! use rolebind_policy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ModifierConfig {
//!         scope: ScopeConfig::Namespace {
//!             namespace: Some("team-a".to_string()),
//!         },
//!         ..ModifierConfig::default()
//!     };
//!
//!     let client = Arc::new(InMemoryAuthorizationClient::new());
//!     let modifier = RoleModifier::from_config(&config, client)?;
//!
//!     let outcome = modifier
//!         .apply(&ModificationRequest::add("view").with_groups(["auditors"]))
//!         .await?;
//!     assert_eq!(outcome.warning_message(), "Warning: role 'view' not found");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod modifier;
pub mod request;
pub mod resolver;

pub mod prelude {
    //! Common imports for rolebind policy

    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::modifier::*;
    pub use crate::request::*;
    pub use crate::resolver::*;

    pub use rolebind_store::prelude::*;

    // Common Result type
    pub type Result<T> = std::result::Result<T, PolicyError>;
}

// Re-export major components at crate level
pub use error::PolicyError;
pub use modifier::RoleModifier;
pub use prelude::Result;
