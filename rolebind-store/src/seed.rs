//! Store seed files
//!
//! A [`StoreSeed`] is a JSON document listing the roles and bindings an
//! in-memory store should start with. It is how demos and fixtures describe a
//! cluster without a real backend.
//!
//! ```json
//! {
//!   "clusterRoles": [{ "metadata": { "name": "edit" } }],
//!   "roleBindings": [{
//!     "metadata": { "name": "edit", "namespace": "default" },
//!     "roleRef": { "name": "edit" },
//!     "subjects": [{ "kind": "User", "name": "foo" }]
//!   }]
//! }
//! ```

use rolebind_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Initial contents of an in-memory store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSeed {
    /// Cluster roles
    #[serde(default)]
    pub cluster_roles: Vec<Role>,
    /// Cluster role bindings
    #[serde(default)]
    pub cluster_role_bindings: Vec<RoleBinding>,
    /// Namespaced roles
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Namespaced role bindings
    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,
}

impl StoreSeed {
    /// Load a seed from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed: StoreSeed = serde_json::from_str(&content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Save the seed as pretty-printed JSON
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the seed
    ///
    /// Every object needs a name, names must be unique per kind and scope,
    /// and cluster-scoped objects must not carry a namespace.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for role in &self.cluster_roles {
            check_name(&role.metadata, ObjectKind::ClusterRole)?;
            check_cluster_scoped(&role.metadata, ObjectKind::ClusterRole)?;
            check_unique(&mut seen, ObjectKind::ClusterRole, &role.metadata)?;
        }
        for binding in &self.cluster_role_bindings {
            check_name(&binding.metadata, ObjectKind::ClusterRoleBinding)?;
            check_cluster_scoped(&binding.metadata, ObjectKind::ClusterRoleBinding)?;
            check_unique(&mut seen, ObjectKind::ClusterRoleBinding, &binding.metadata)?;
        }
        for role in &self.roles {
            check_name(&role.metadata, ObjectKind::Role)?;
            check_unique(&mut seen, ObjectKind::Role, &role.metadata)?;
        }
        for binding in &self.role_bindings {
            check_name(&binding.metadata, ObjectKind::RoleBinding)?;
            check_unique(&mut seen, ObjectKind::RoleBinding, &binding.metadata)?;
        }

        Ok(())
    }
}

fn check_name(meta: &ObjectMeta, kind: ObjectKind) -> Result<()> {
    if meta.name.trim().is_empty() {
        return Err(Error::validation(format!("{kind} without a name")));
    }
    Ok(())
}

fn check_cluster_scoped(meta: &ObjectMeta, kind: ObjectKind) -> Result<()> {
    if let Some(ns) = &meta.namespace {
        return Err(Error::validation(format!(
            "{kind} \"{}\" is cluster-scoped but names namespace \"{ns}\"",
            meta.name
        )));
    }
    Ok(())
}

fn check_unique<'a>(
    seen: &mut HashSet<(ObjectKind, &'a str, &'a str)>,
    kind: ObjectKind,
    meta: &'a ObjectMeta,
) -> Result<()> {
    let namespace = meta.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
    if !seen.insert((kind, namespace, meta.name.as_str())) {
        return Err(Error::validation(format!(
            "duplicate {kind} \"{}\"",
            meta.name
        )));
    }
    Ok(())
}
