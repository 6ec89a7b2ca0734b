//! Scoped role binding accessors
//!
//! [`RoleBindingAccessor`] is the capability set the resolver and orchestrator
//! work through. It has one implementation per scope:
//!
//! - [`ClusterRoleBindingAccessor`] reads and writes cluster role bindings,
//!   which can only reference cluster roles.
//! - [`LocalRoleBindingAccessor`] reads and writes role bindings in one
//!   namespace, which may reference either a cluster role or a role local to
//!   that namespace.
//!
//! Callers never branch on scope; everything scope-specific (the namespace
//! qualifier, which kind of role a reference points at, how a fresh binding is
//! stamped) lives behind the trait.

use crate::client::AuthorizationClient;
use async_trait::async_trait;
use rolebind_core::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Binding operations at one scope
#[async_trait]
pub trait RoleBindingAccessor: Send + Sync {
    /// Scope every call operates in
    fn scope(&self) -> Scope;

    /// Build a reference to `role_name` as seen from this scope
    ///
    /// `role_namespace` names a local role. Scopes that cannot reference local
    /// roles ignore it.
    fn role_ref(&self, role_name: &str, role_namespace: Option<&str>) -> RoleRef;

    /// Build an unsaved, empty binding named `name` granting `role_ref`
    fn new_binding(&self, name: &str, role_ref: RoleRef) -> RoleBinding;

    /// All bindings in scope that grant `role`
    async fn list_bindings_for_role(&self, role: &RoleRef) -> StoreResult<Vec<RoleBinding>>;

    /// Names of every binding in scope, whatever role they grant
    async fn existing_binding_names(&self) -> StoreResult<BTreeSet<String>>;

    /// Fetch a binding; `NotFound` if absent
    async fn get_binding(&self, name: &str) -> StoreResult<RoleBinding>;

    /// Create a binding; `AlreadyExists` on a name collision
    async fn create_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding>;

    /// Replace a binding
    ///
    /// The binding must carry the resource version it was read at. `Conflict`
    /// if the stored copy changed since, `NotFound` if it was removed.
    async fn update_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding>;

    /// Whether the referenced role exists
    ///
    /// Advisory only: store failures are logged and reported as `false`.
    async fn role_exists(&self, role: &RoleRef) -> bool;
}

/// Interpret a role lookup for [`RoleBindingAccessor::role_exists`].
fn found<T>(role: &RoleRef, lookup: StoreResult<T>) -> bool {
    match lookup {
        Ok(_) => true,
        Err(e) if e.is_not_found() => false,
        Err(e) => {
            warn!(role = %role, error = %e, "Role lookup failed, treating role as missing");
            false
        }
    }
}

/// Accessor for cluster role bindings
#[derive(Clone)]
pub struct ClusterRoleBindingAccessor {
    client: Arc<dyn AuthorizationClient>,
}

impl ClusterRoleBindingAccessor {
    /// Create an accessor over `client`
    pub fn new(client: Arc<dyn AuthorizationClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleBindingAccessor for ClusterRoleBindingAccessor {
    fn scope(&self) -> Scope {
        Scope::Cluster
    }

    fn role_ref(&self, role_name: &str, _role_namespace: Option<&str>) -> RoleRef {
        RoleRef::cluster(role_name)
    }

    fn new_binding(&self, name: &str, role_ref: RoleRef) -> RoleBinding {
        RoleBinding::new(ObjectMeta::new(name), role_ref)
    }

    async fn list_bindings_for_role(&self, role: &RoleRef) -> StoreResult<Vec<RoleBinding>> {
        let bindings = self.client.list_cluster_role_bindings().await?;
        let matching: Vec<RoleBinding> = bindings
            .into_iter()
            .filter(|binding| binding.role_ref.name == role.name)
            .collect();

        debug!(
            kind = %self.scope().binding_kind(),
            role = %role.name,
            count = matching.len(),
            "Listed bindings for role"
        );
        Ok(matching)
    }

    async fn existing_binding_names(&self) -> StoreResult<BTreeSet<String>> {
        let bindings = self.client.list_cluster_role_bindings().await?;
        Ok(bindings.into_iter().map(|b| b.metadata.name).collect())
    }

    async fn get_binding(&self, name: &str) -> StoreResult<RoleBinding> {
        self.client.get_cluster_role_binding(name).await
    }

    async fn create_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding> {
        self.client.create_cluster_role_binding(binding).await
    }

    async fn update_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding> {
        self.client.update_cluster_role_binding(binding).await
    }

    async fn role_exists(&self, role: &RoleRef) -> bool {
        found(role, self.client.get_cluster_role(&role.name).await)
    }
}

/// Accessor for role bindings in one namespace
#[derive(Clone)]
pub struct LocalRoleBindingAccessor {
    namespace: String,
    client: Arc<dyn AuthorizationClient>,
}

impl LocalRoleBindingAccessor {
    /// Create an accessor for `namespace` over `client`
    pub fn new(namespace: impl Into<String>, client: Arc<dyn AuthorizationClient>) -> Self {
        Self {
            namespace: namespace.into(),
            client,
        }
    }

    /// Create an accessor for [`DEFAULT_NAMESPACE`]
    pub fn in_default_namespace(client: Arc<dyn AuthorizationClient>) -> Self {
        Self::new(DEFAULT_NAMESPACE, client)
    }

    /// Namespace this accessor operates in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl RoleBindingAccessor for LocalRoleBindingAccessor {
    fn scope(&self) -> Scope {
        Scope::Namespace(self.namespace.clone())
    }

    fn role_ref(&self, role_name: &str, role_namespace: Option<&str>) -> RoleRef {
        RoleRef {
            name: role_name.to_string(),
            namespace: role_namespace.map(str::to_string),
        }
    }

    fn new_binding(&self, name: &str, role_ref: RoleRef) -> RoleBinding {
        RoleBinding::new(ObjectMeta::namespaced(&self.namespace, name), role_ref)
    }

    async fn list_bindings_for_role(&self, role: &RoleRef) -> StoreResult<Vec<RoleBinding>> {
        let bindings = self.client.list_role_bindings(&self.namespace).await?;
        let matching: Vec<RoleBinding> = bindings
            .into_iter()
            .filter(|binding| binding.role_ref == *role)
            .collect();

        debug!(
            kind = %self.scope().binding_kind(),
            namespace = %self.namespace,
            role = %role,
            count = matching.len(),
            "Listed bindings for role"
        );
        Ok(matching)
    }

    async fn existing_binding_names(&self) -> StoreResult<BTreeSet<String>> {
        let bindings = self.client.list_role_bindings(&self.namespace).await?;
        Ok(bindings.into_iter().map(|b| b.metadata.name).collect())
    }

    async fn get_binding(&self, name: &str) -> StoreResult<RoleBinding> {
        self.client.get_role_binding(&self.namespace, name).await
    }

    async fn create_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding> {
        self.client.create_role_binding(&self.namespace, binding).await
    }

    async fn update_binding(&self, binding: RoleBinding) -> StoreResult<RoleBinding> {
        self.client.update_role_binding(&self.namespace, binding).await
    }

    async fn role_exists(&self, role: &RoleRef) -> bool {
        let lookup = match &role.namespace {
            Some(ns) => self.client.get_role(ns, &role.name).await,
            None => self.client.get_cluster_role(&role.name).await,
        };
        found(role, lookup)
    }
}
