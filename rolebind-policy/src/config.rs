//! Configuration types for rolebind policy operations

use crate::error::PolicyError;
use rolebind_core::types::DEFAULT_NAMESPACE;
use rolebind_store::accessor::{
    ClusterRoleBindingAccessor, LocalRoleBindingAccessor, RoleBindingAccessor,
};
use rolebind_store::client::AuthorizationClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which bindings a modifier operates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ScopeConfig {
    /// Cluster role bindings
    Cluster,
    /// Role bindings in one namespace
    Namespace {
        /// Target namespace; falls back to `default_namespace` when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
}

impl Default for ScopeConfig {
    fn default() -> Self {
        ScopeConfig::Namespace { namespace: None }
    }
}

/// Role modifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModifierConfig {
    /// Binding scope
    pub scope: ScopeConfig,
    /// Namespace used when the scope names none
    pub default_namespace: String,
    /// Compute outcomes without writing to the store
    pub dry_run: bool,
    /// Log every persisted binding change
    pub audit_logging: bool,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            scope: ScopeConfig::default(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            dry_run: false,
            audit_logging: true,
        }
    }
}

impl ModifierConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> std::result::Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PolicyError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: ModifierConfig = serde_json::from_str(&content).map_err(|e| {
            PolicyError::Configuration(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: &str) -> std::result::Result<(), PolicyError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            PolicyError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            PolicyError::Configuration(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Configuration for local experiments: namespace scope, nothing written
    pub fn development() -> Self {
        Self {
            scope: ScopeConfig::default(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            dry_run: true,
            audit_logging: false,
        }
    }

    /// Configuration for cluster administration with audit logging
    pub fn production() -> Self {
        Self {
            scope: ScopeConfig::Cluster,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            dry_run: false,
            audit_logging: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), PolicyError> {
        if self.default_namespace.trim().is_empty() {
            return Err(PolicyError::Configuration(
                "default namespace must not be empty".to_string(),
            ));
        }

        if let ScopeConfig::Namespace {
            namespace: Some(ns),
        } = &self.scope
            && ns.trim().is_empty()
        {
            return Err(PolicyError::Configuration(
                "scope namespace must not be empty; omit it to use the default".to_string(),
            ));
        }

        Ok(())
    }

    /// Namespace the configured scope resolves to, `None` for cluster scope
    pub fn namespace(&self) -> Option<&str> {
        match &self.scope {
            ScopeConfig::Cluster => None,
            ScopeConfig::Namespace { namespace } => {
                Some(namespace.as_deref().unwrap_or(&self.default_namespace))
            }
        }
    }

    /// Build the accessor for the configured scope over `client`
    pub fn accessor(
        &self,
        client: Arc<dyn AuthorizationClient>,
    ) -> std::result::Result<Arc<dyn RoleBindingAccessor>, PolicyError> {
        self.validate()?;

        let accessor: Arc<dyn RoleBindingAccessor> = match self.namespace() {
            None => Arc::new(ClusterRoleBindingAccessor::new(client)),
            Some(ns) => Arc::new(LocalRoleBindingAccessor::new(ns, client)),
        };
        Ok(accessor)
    }
}
