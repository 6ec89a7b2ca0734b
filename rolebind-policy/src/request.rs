//! Modification requests and their outcomes

use crate::error::PolicyError;
use rolebind_core::types::Subject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with the request's subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Grant the role to the subjects
    Add,
    /// Take the role away from the subjects
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Remove => write!(f, "remove"),
        }
    }
}

/// One add or remove invocation
///
/// The scope is not part of the request; it comes from the accessor the
/// [`RoleModifier`](crate::modifier::RoleModifier) was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    /// Add or remove
    pub action: Action,
    /// Role being granted or revoked
    pub role_name: String,
    /// Namespace of a local role; `None` means a cluster role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_namespace: Option<String>,
    /// Binding to operate on; chosen automatically when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_name: Option<String>,
    /// Subjects to add or remove
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl ModificationRequest {
    /// Create a request granting `role_name`
    pub fn add(role_name: impl Into<String>) -> Self {
        Self::new(Action::Add, role_name)
    }

    /// Create a request revoking `role_name`
    pub fn remove(role_name: impl Into<String>) -> Self {
        Self::new(Action::Remove, role_name)
    }

    fn new(action: Action, role_name: impl Into<String>) -> Self {
        Self {
            action,
            role_name: role_name.into(),
            role_namespace: None,
            binding_name: None,
            subjects: Vec::new(),
        }
    }

    /// Operate on the binding called `name` instead of choosing one
    pub fn with_binding_name(mut self, name: impl Into<String>) -> Self {
        self.binding_name = Some(name.into());
        self
    }

    /// Reference a role local to `namespace`
    pub fn with_role_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.role_namespace = Some(namespace.into());
        self
    }

    /// Append user subjects
    pub fn with_users<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(names.into_iter().map(Subject::user));
        self
    }

    /// Append group subjects
    pub fn with_groups<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(names.into_iter().map(Subject::group));
        self
    }

    /// Append already typed subjects
    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = Subject>) -> Self {
        self.subjects.extend(subjects);
        self
    }

    /// Explicit binding name, treating an empty name as none
    pub fn explicit_binding_name(&self) -> Option<&str> {
        self.binding_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Reject requests that cannot be acted on
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.role_name.trim().is_empty() {
            return Err(PolicyError::InvalidRequest(
                "a role name is required".to_string(),
            ));
        }
        if self.subjects.is_empty() {
            return Err(PolicyError::InvalidRequest(format!(
                "at least one subject is required to {} role '{}'",
                self.action, self.role_name
            )));
        }
        if let Some(subject) = self.subjects.iter().find(|s| s.name.trim().is_empty()) {
            return Err(PolicyError::InvalidRequest(format!(
                "{} subject without a name",
                subject.kind
            )));
        }
        Ok(())
    }
}

/// Result of one successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationOutcome {
    /// Binding that was created or updated
    pub binding_name: String,
    /// Subjects the binding holds afterwards
    pub subjects: Vec<Subject>,
    /// Advisory warning, set when an added role does not exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Whether the binding was newly created
    pub created: bool,
    /// Whether the change was computed without being persisted
    pub dry_run: bool,
}

impl ModificationOutcome {
    /// The warning text, or `""` when there is none
    pub fn warning_message(&self) -> &str {
        self.warning.as_deref().unwrap_or_default()
    }

    /// Names of the resulting subjects in order
    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
    }
}
