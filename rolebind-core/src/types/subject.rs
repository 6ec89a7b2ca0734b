//! Subject types bound by role bindings

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity kinds a binding can grant a role to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// Human user
    User,
    /// Group of users
    Group,
    /// Namespaced workload identity
    ServiceAccount,
}

impl std::str::FromStr for SubjectKind {
    type Err = Error;

    /// Parse subject kind from string
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "user" => Ok(SubjectKind::User),
            "group" => Ok(SubjectKind::Group),
            "serviceaccount" | "service-account" | "sa" => Ok(SubjectKind::ServiceAccount),
            _ => Err(Error::InvalidSubjectKind(s.to_string())),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::User => write!(f, "User"),
            SubjectKind::Group => write!(f, "Group"),
            SubjectKind::ServiceAccount => write!(f, "ServiceAccount"),
        }
    }
}

/// An identity bound to a role
///
/// Equality is structural over kind, name and namespace; two subjects with the
/// same name but different kinds are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Kind of identity
    pub kind: SubjectKind,
    /// Identity name
    pub name: String,
    /// Namespace, only meaningful for service accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Subject {
    /// Create a user subject
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::User,
            name: name.into(),
            namespace: None,
        }
    }

    /// Create a group subject
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::Group,
            name: name.into(),
            namespace: None,
        }
    }

    /// Create a service account subject
    pub fn service_account(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::ServiceAccount,
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}:{}:{}", self.kind, ns, self.name),
            None => write!(f, "{}:{}", self.kind, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_subject_kind_parsing() {
        assert_eq!(SubjectKind::from_str("User").unwrap(), SubjectKind::User);
        assert_eq!(SubjectKind::from_str("group").unwrap(), SubjectKind::Group);
        assert_eq!(
            SubjectKind::from_str("ServiceAccount").unwrap(),
            SubjectKind::ServiceAccount
        );
        assert!(SubjectKind::from_str("robot").is_err());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Subject::user("foo"), Subject::user("foo"));
        assert_ne!(Subject::user("foo"), Subject::group("foo"));
        assert_ne!(
            Subject::service_account("a", "builder"),
            Subject::service_account("b", "builder")
        );
    }

    #[test]
    fn test_subject_display() {
        assert_eq!(Subject::user("foo").to_string(), "User:foo");
        assert_eq!(
            Subject::service_account("ci", "deployer").to_string(),
            "ServiceAccount:ci:deployer"
        );
    }
}
