//! Core authorization object types
//!
//! This module defines the objects rolebind reads and writes: roles, role
//! bindings and the subjects bound by them, plus the metadata and scope
//! qualifiers shared by all of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod role;
pub mod subject;

pub use role::*;
pub use subject::*;

/// Namespace used when a namespaced operation is not given one explicitly.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Where a binding lives and takes effect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "namespace")]
pub enum Scope {
    /// Visible across the entire managed system
    Cluster,
    /// Effective only within one namespace
    Namespace(String),
}

impl Scope {
    /// Namespace qualifier, `None` for cluster scope
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Scope::Cluster => None,
            Scope::Namespace(ns) => Some(ns),
        }
    }

    /// Kind of binding object stored at this scope
    pub fn binding_kind(&self) -> ObjectKind {
        match self {
            Scope::Cluster => ObjectKind::ClusterRoleBinding,
            Scope::Namespace(_) => ObjectKind::RoleBinding,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Cluster => write!(f, "cluster"),
            Scope::Namespace(ns) => write!(f, "namespace/{ns}"),
        }
    }
}

/// Kinds of objects held by the authorization store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Cluster-wide role
    ClusterRole,
    /// Namespaced role
    Role,
    /// Cluster-wide role binding
    ClusterRoleBinding,
    /// Namespaced role binding
    RoleBinding,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::ClusterRole => write!(f, "clusterrole"),
            ObjectKind::Role => write!(f, "role"),
            ObjectKind::ClusterRoleBinding => write!(f, "clusterrolebinding"),
            ObjectKind::RoleBinding => write!(f, "rolebinding"),
        }
    }
}

/// Metadata common to every stored object
///
/// `uid`, `resource_version` and `creation_timestamp` are assigned by the
/// store on create. `resource_version` changes on every write and is echoed
/// back on update so that the store can reject stale writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name, unique within its scope
    pub name: String,
    /// Namespace, absent for cluster-scoped objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Store-assigned unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Store-assigned version used for optimistic concurrency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Time the store accepted the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    /// Creates metadata for a cluster-scoped object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates metadata for a namespaced object
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }
}
