//! Authorization store client interface
//!
//! [`AuthorizationClient`] is the typed surface rolebind consumes from the
//! backing store. Implementations translate store failures into
//! [`StoreError`](rolebind_core::StoreError) values: a missing object is
//! `NotFound`, a name collision on create is `AlreadyExists` and an update
//! carrying a stale resource version is `Conflict`.

use async_trait::async_trait;
use rolebind_core::prelude::*;

/// Typed CRUD access to roles and role bindings at both scopes
#[async_trait]
pub trait AuthorizationClient: Send + Sync {
    /// List every cluster role binding
    async fn list_cluster_role_bindings(&self) -> StoreResult<Vec<RoleBinding>>;

    /// Fetch a cluster role binding by name
    async fn get_cluster_role_binding(&self, name: &str) -> StoreResult<RoleBinding>;

    /// Create a cluster role binding
    async fn create_cluster_role_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding>;

    /// Replace a cluster role binding
    async fn update_cluster_role_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding>;

    /// Fetch a cluster role by name
    async fn get_cluster_role(&self, name: &str) -> StoreResult<Role>;

    /// List every role binding in `namespace`
    async fn list_role_bindings(&self, namespace: &str) -> StoreResult<Vec<RoleBinding>>;

    /// Fetch a role binding by namespace and name
    async fn get_role_binding(&self, namespace: &str, name: &str) -> StoreResult<RoleBinding>;

    /// Create a role binding in `namespace`
    async fn create_role_binding(
        &self,
        namespace: &str,
        binding: RoleBinding,
    ) -> StoreResult<RoleBinding>;

    /// Replace a role binding in `namespace`
    async fn update_role_binding(
        &self,
        namespace: &str,
        binding: RoleBinding,
    ) -> StoreResult<RoleBinding>;

    /// Fetch a namespaced role
    async fn get_role(&self, namespace: &str, name: &str) -> StoreResult<Role>;
}
