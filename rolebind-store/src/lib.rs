//! # rolebind store
//!
//! Store plumbing for rolebind: the typed client interface to the
//! authorization store, an in-memory implementation of it, and the scoped
//! accessors that the policy layer works through.
//!
//! ## Quick Start
//!
//! ```rust
//! use rolebind_store::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = InMemoryAuthorizationClient::builder()
//!         .with_cluster_role("edit")
//!         .build();
//!     let accessor = ClusterRoleBindingAccessor::new(Arc::new(client));
//!
//!     let binding = accessor.new_binding("edit", accessor.role_ref("edit", None));
//!     accessor.create_binding(binding).await?;
//!     assert!(accessor.role_exists(&RoleRef::cluster("edit")).await);
//!     Ok(())
//! }
//! ```

pub mod accessor;
pub mod client;
pub mod memory;
pub mod seed;

pub use accessor::*;
pub use client::*;
pub use memory::*;
pub use seed::*;

/// Common imports for working with the store
pub mod prelude {
    pub use crate::accessor::*;
    pub use crate::client::*;
    pub use crate::memory::*;
    pub use crate::seed::*;
    pub use rolebind_core::prelude::*;

    pub use async_trait::async_trait;
}
