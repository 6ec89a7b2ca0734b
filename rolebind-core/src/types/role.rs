//! Role and role binding objects

use super::*;

/// A named set of permissions
///
/// rolebind never inspects what a role grants; only its existence matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Object metadata
    pub metadata: ObjectMeta,
}

impl Role {
    /// Creates a cluster role
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(name),
        }
    }

    /// Creates a namespaced role
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::namespaced(namespace, name),
        }
    }

    /// Role name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Reference from a binding to the role it grants
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    /// Name of the referenced role
    pub name: String,
    /// Namespace of a local role; `None` references a cluster role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl RoleRef {
    /// References a cluster role
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    /// References a role local to `namespace`
    pub fn local(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Kind of role object this reference points at
    pub fn role_kind(&self) -> ObjectKind {
        if self.namespace.is_some() {
            ObjectKind::Role
        } else {
            ObjectKind::ClusterRole
        }
    }
}

impl fmt::Display for RoleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Grants a role to an ordered list of subjects
///
/// The role reference is fixed at creation. rolebind only ever replaces the
/// subject list of an existing binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Role granted by this binding
    pub role_ref: RoleRef,
    /// Subjects the role is granted to
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl RoleBinding {
    /// Creates an empty binding with the given metadata
    pub fn new(metadata: ObjectMeta, role_ref: RoleRef) -> Self {
        Self {
            metadata,
            role_ref,
            subjects: Vec::new(),
        }
    }

    /// Replaces the subject list
    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = Subject>) -> Self {
        self.subjects = subjects.into_iter().collect();
        self
    }

    /// Binding name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Names of all subjects in order
    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_builder() {
        let binding = RoleBinding::new(ObjectMeta::new("edit"), RoleRef::cluster("edit"))
            .with_subjects([Subject::user("foo"), Subject::group("devs")]);

        assert_eq!(binding.name(), "edit");
        assert_eq!(binding.subject_names(), vec!["foo", "devs"]);
        assert_eq!(binding.role_ref.role_kind(), ObjectKind::ClusterRole);
    }

    #[test]
    fn test_binding_serialization_uses_camel_case() {
        let binding = RoleBinding::new(
            ObjectMeta::namespaced("default", "custom"),
            RoleRef::local("default", "edit"),
        )
        .with_subjects([Subject::user("bar")]);

        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(json["roleRef"]["name"], "edit");
        assert_eq!(json["metadata"]["namespace"], "default");
        assert!(json["metadata"].get("resourceVersion").is_none());

        let parsed: RoleBinding = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, binding);
    }
}
