//! In-memory implementation of the authorization store client.
//!
//! # Purpose
//! [`InMemoryAuthorizationClient`] implements [`AuthorizationClient`] entirely in
//! memory. It is used by tests and demos in place of a real store, and it
//! enforces the same contract a real store does:
//! - names are unique per kind and scope, so a second create fails with
//!   `AlreadyExists`
//! - every write bumps a store-wide resource version, and an update carrying a
//!   version other than the stored one fails with `Conflict`
//! - an update without a resource version is applied unconditionally
//! - a binding's role reference cannot be changed by an update
//!
//! # Consistency
//! All objects sit behind one `tokio::sync::RwLock`. Reads run concurrently,
//! writes are serialized, and clones of the client share the same state.

use crate::client::AuthorizationClient;
use crate::seed::StoreSeed;
use async_trait::async_trait;
use chrono::Utc;
use rolebind_core::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

const CONFLICT_REASON: &str =
    "the object has been modified; please apply your changes to the latest version and try again";

/// Key of a namespaced object: `(namespace, name)`.
type NamespacedKey = (String, String);

fn namespaced_key(namespace: &str, name: &str) -> NamespacedKey {
    (namespace.to_string(), name.to_string())
}

#[derive(Debug, Default)]
struct Objects {
    cluster_roles: BTreeMap<String, Role>,
    cluster_role_bindings: BTreeMap<String, RoleBinding>,
    roles: BTreeMap<NamespacedKey, Role>,
    role_bindings: BTreeMap<NamespacedKey, RoleBinding>,
    /// Last resource version handed out.
    version: u64,
}

impl Objects {
    fn next_version(&mut self) -> String {
        self.version += 1;
        self.version.to_string()
    }

    /// Fill in store-assigned metadata for an object entering the store.
    fn admit(&mut self, meta: &mut ObjectMeta) {
        meta.uid = Some(Uuid::new_v4().to_string());
        meta.creation_timestamp = Some(Utc::now());
        meta.resource_version = Some(self.next_version());
    }
}

/// Rejects a create before any metadata is assigned.
fn check_create<K: Ord>(
    bindings: &BTreeMap<K, RoleBinding>,
    key: &K,
    binding: &RoleBinding,
    kind: ObjectKind,
) -> StoreResult<()> {
    if binding.metadata.name.is_empty() {
        return Err(StoreError::invalid(kind, "", "name is required"));
    }
    if bindings.contains_key(key) {
        return Err(StoreError::already_exists(kind, binding.metadata.name.clone()));
    }
    Ok(())
}

/// Validates an update against the stored copy and carries over the
/// immutable metadata. The caller assigns the new resource version.
fn check_update(
    stored: Option<&RoleBinding>,
    binding: &mut RoleBinding,
    kind: ObjectKind,
) -> StoreResult<()> {
    let name = binding.metadata.name.clone();
    let Some(stored) = stored else {
        return Err(StoreError::not_found(kind, name));
    };

    if let Some(version) = &binding.metadata.resource_version
        && stored.metadata.resource_version.as_ref() != Some(version)
    {
        return Err(StoreError::conflict(kind, name, CONFLICT_REASON));
    }
    if stored.role_ref != binding.role_ref {
        return Err(StoreError::invalid(kind, name, "roleRef is immutable"));
    }

    binding.metadata.uid = stored.metadata.uid.clone();
    binding.metadata.creation_timestamp = stored.metadata.creation_timestamp;
    Ok(())
}

/// In-memory authorization store client
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthorizationClient {
    objects: Arc<RwLock<Objects>>,
}

impl InMemoryAuthorizationClient {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a pre-populated store
    pub fn builder() -> InMemoryClientBuilder {
        InMemoryClientBuilder::new()
    }

    /// Create a store holding every object of `seed`
    pub fn from_seed(seed: StoreSeed) -> Self {
        InMemoryClientBuilder {
            cluster_roles: seed.cluster_roles,
            cluster_role_bindings: seed.cluster_role_bindings,
            roles: seed.roles,
            role_bindings: seed.role_bindings,
        }
        .build()
    }

    /// Current store-wide resource version
    pub async fn resource_version(&self) -> u64 {
        self.objects.read().await.version
    }
}

#[async_trait]
impl AuthorizationClient for InMemoryAuthorizationClient {
    async fn list_cluster_role_bindings(&self) -> StoreResult<Vec<RoleBinding>> {
        let objects = self.objects.read().await;
        Ok(objects.cluster_role_bindings.values().cloned().collect())
    }

    async fn get_cluster_role_binding(&self, name: &str) -> StoreResult<RoleBinding> {
        let objects = self.objects.read().await;
        objects
            .cluster_role_bindings
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ObjectKind::ClusterRoleBinding, name))
    }

    async fn create_cluster_role_binding(
        &self,
        mut binding: RoleBinding,
    ) -> StoreResult<RoleBinding> {
        let mut objects = self.objects.write().await;
        binding.metadata.namespace = None;

        let key = binding.metadata.name.clone();
        check_create(
            &objects.cluster_role_bindings,
            &key,
            &binding,
            ObjectKind::ClusterRoleBinding,
        )?;
        objects.admit(&mut binding.metadata);
        objects.cluster_role_bindings.insert(key, binding.clone());

        debug!(
            binding = %binding.metadata.name,
            role = %binding.role_ref,
            version = objects.version,
            "Created cluster role binding"
        );
        Ok(binding)
    }

    async fn update_cluster_role_binding(
        &self,
        mut binding: RoleBinding,
    ) -> StoreResult<RoleBinding> {
        let mut objects = self.objects.write().await;
        binding.metadata.namespace = None;
        check_update(
            objects.cluster_role_bindings.get(&binding.metadata.name),
            &mut binding,
            ObjectKind::ClusterRoleBinding,
        )?;

        binding.metadata.resource_version = Some(objects.next_version());
        objects
            .cluster_role_bindings
            .insert(binding.metadata.name.clone(), binding.clone());

        debug!(
            binding = %binding.metadata.name,
            subjects = binding.subjects.len(),
            version = objects.version,
            "Updated cluster role binding"
        );
        Ok(binding)
    }

    async fn get_cluster_role(&self, name: &str) -> StoreResult<Role> {
        let objects = self.objects.read().await;
        objects
            .cluster_roles
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ObjectKind::ClusterRole, name))
    }

    async fn list_role_bindings(&self, namespace: &str) -> StoreResult<Vec<RoleBinding>> {
        let objects = self.objects.read().await;
        Ok(objects
            .role_bindings
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, binding)| binding.clone())
            .collect())
    }

    async fn get_role_binding(&self, namespace: &str, name: &str) -> StoreResult<RoleBinding> {
        let objects = self.objects.read().await;
        objects
            .role_bindings
            .get(&namespaced_key(namespace, name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(ObjectKind::RoleBinding, name))
    }

    async fn create_role_binding(
        &self,
        namespace: &str,
        mut binding: RoleBinding,
    ) -> StoreResult<RoleBinding> {
        let mut objects = self.objects.write().await;
        binding.metadata.namespace = Some(namespace.to_string());

        let key = namespaced_key(namespace, &binding.metadata.name);
        check_create(&objects.role_bindings, &key, &binding, ObjectKind::RoleBinding)?;
        objects.admit(&mut binding.metadata);
        objects.role_bindings.insert(key, binding.clone());

        debug!(
            namespace = %namespace,
            binding = %binding.metadata.name,
            role = %binding.role_ref,
            version = objects.version,
            "Created role binding"
        );
        Ok(binding)
    }

    async fn update_role_binding(
        &self,
        namespace: &str,
        mut binding: RoleBinding,
    ) -> StoreResult<RoleBinding> {
        let mut objects = self.objects.write().await;
        binding.metadata.namespace = Some(namespace.to_string());

        let key = namespaced_key(namespace, &binding.metadata.name);
        check_update(
            objects.role_bindings.get(&key),
            &mut binding,
            ObjectKind::RoleBinding,
        )?;

        binding.metadata.resource_version = Some(objects.next_version());
        objects.role_bindings.insert(key, binding.clone());

        debug!(
            namespace = %namespace,
            binding = %binding.metadata.name,
            subjects = binding.subjects.len(),
            version = objects.version,
            "Updated role binding"
        );
        Ok(binding)
    }

    async fn get_role(&self, namespace: &str, name: &str) -> StoreResult<Role> {
        let objects = self.objects.read().await;
        objects
            .roles
            .get(&namespaced_key(namespace, name))
            .cloned()
            .ok_or_else(|| StoreError::not_found(ObjectKind::Role, name))
    }
}

/// Builder for a pre-populated [`InMemoryAuthorizationClient`]
///
/// Seeded objects get store-assigned metadata exactly as if they had been
/// created through the client. A later object with the same key replaces an
/// earlier one. Namespaced objects without a namespace land in
/// [`DEFAULT_NAMESPACE`].
#[derive(Debug, Default)]
pub struct InMemoryClientBuilder {
    cluster_roles: Vec<Role>,
    cluster_role_bindings: Vec<RoleBinding>,
    roles: Vec<Role>,
    role_bindings: Vec<RoleBinding>,
}

impl InMemoryClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster role
    pub fn with_cluster_role(mut self, name: &str) -> Self {
        self.cluster_roles.push(Role::cluster(name));
        self
    }

    /// Add a cluster role binding
    pub fn with_cluster_role_binding(mut self, binding: RoleBinding) -> Self {
        self.cluster_role_bindings.push(binding);
        self
    }

    /// Add a role local to `namespace`
    pub fn with_role(mut self, namespace: &str, name: &str) -> Self {
        self.roles.push(Role::namespaced(namespace, name));
        self
    }

    /// Add a namespaced role binding
    pub fn with_role_binding(mut self, binding: RoleBinding) -> Self {
        self.role_bindings.push(binding);
        self
    }

    /// Build the store
    pub fn build(self) -> InMemoryAuthorizationClient {
        let mut objects = Objects::default();

        for mut role in self.cluster_roles {
            role.metadata.namespace = None;
            objects.admit(&mut role.metadata);
            objects
                .cluster_roles
                .insert(role.metadata.name.clone(), role);
        }

        for mut binding in self.cluster_role_bindings {
            binding.metadata.namespace = None;
            objects.admit(&mut binding.metadata);
            objects
                .cluster_role_bindings
                .insert(binding.metadata.name.clone(), binding);
        }

        for mut role in self.roles {
            let namespace = role
                .metadata
                .namespace
                .get_or_insert_with(|| DEFAULT_NAMESPACE.to_string())
                .clone();
            objects.admit(&mut role.metadata);
            objects
                .roles
                .insert(namespaced_key(&namespace, &role.metadata.name), role);
        }

        for mut binding in self.role_bindings {
            let namespace = binding
                .metadata
                .namespace
                .get_or_insert_with(|| DEFAULT_NAMESPACE.to_string())
                .clone();
            objects.admit(&mut binding.metadata);
            objects
                .role_bindings
                .insert(namespaced_key(&namespace, &binding.metadata.name), binding);
        }

        InMemoryAuthorizationClient {
            objects: Arc::new(RwLock::new(objects)),
        }
    }
}
