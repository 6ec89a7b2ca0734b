//! Role modification orchestrator
//!
//! [`RoleModifier`] is the entry point behind "give subject X role Y" and
//! "take role Y away from subject X". Each call resolves the target binding,
//! reads it, computes the new subject list and issues exactly one create or
//! update. Store failures are returned unchanged; nothing is retried here.

use crate::config::ModifierConfig;
use crate::error::PolicyError;
use crate::request::{Action, ModificationOutcome, ModificationRequest};
use crate::resolver::{BindingResolver, BindingTarget};
use rolebind_core::subject_set::{merge, subtract};
use rolebind_core::types::{RoleBinding, RoleRef};
use rolebind_store::accessor::RoleBindingAccessor;
use rolebind_store::client::AuthorizationClient;
use std::sync::Arc;
use tracing::{debug, info, warn};

type PolicyResult<T> = std::result::Result<T, PolicyError>;

/// Receives the advisory warning emitted by an add
pub type WarningSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Adds and removes role subjects through a scoped accessor
pub struct RoleModifier {
    accessor: Arc<dyn RoleBindingAccessor>,
    dry_run: bool,
    audit_logging: bool,
    warning_sink: Option<WarningSink>,
}

impl RoleModifier {
    /// Create a modifier builder around `accessor`
    pub fn builder(accessor: Arc<dyn RoleBindingAccessor>) -> RoleModifierBuilder {
        RoleModifierBuilder::new(accessor)
    }

    /// Create a modifier with default settings
    pub fn new(accessor: Arc<dyn RoleBindingAccessor>) -> Self {
        Self::builder(accessor).build()
    }

    /// Create a modifier for the scope and settings in `config`
    pub fn from_config(
        config: &ModifierConfig,
        client: Arc<dyn AuthorizationClient>,
    ) -> PolicyResult<Self> {
        let accessor = config.accessor(client)?;
        Ok(Self::builder(accessor).with_config(config).build())
    }

    /// Accessor this modifier writes through
    pub fn accessor(&self) -> &dyn RoleBindingAccessor {
        self.accessor.as_ref()
    }

    /// Run `request` according to its action
    pub async fn apply(&self, request: &ModificationRequest) -> PolicyResult<ModificationOutcome> {
        match request.action {
            Action::Add => self.add_role(request).await,
            Action::Remove => self.remove_role(request).await,
        }
    }

    /// Grant the request's role to its subjects
    ///
    /// A missing role is not an error: the binding is written anyway, since
    /// the role may be created later, and the outcome carries the warning
    /// `Warning: role '<name>' not found`.
    pub async fn add_role(&self, request: &ModificationRequest) -> PolicyResult<ModificationOutcome> {
        request.validate()?;
        let accessor = self.accessor();
        let role = accessor.role_ref(&request.role_name, request.role_namespace.as_deref());

        let target = BindingResolver::new(accessor)
            .resolve(Action::Add, &role, request.explicit_binding_name())
            .await?;

        let (mut binding, exists) = match &target {
            BindingTarget::Named(name) => match accessor.get_binding(name).await {
                Ok(binding) => {
                    ensure_grants(&binding, &role)?;
                    (binding, true)
                }
                Err(e) if e.is_not_found() => (accessor.new_binding(name, role.clone()), false),
                Err(e) => return Err(e.into()),
            },
            BindingTarget::Fresh(name) => (accessor.new_binding(name, role.clone()), false),
        };

        let warning = if accessor.role_exists(&role).await {
            None
        } else {
            Some(format!("Warning: role '{}' not found", request.role_name))
        };
        if let Some(message) = &warning {
            warn!(scope = %accessor.scope(), role = %role, "{}", message);
            if let Some(sink) = &self.warning_sink {
                sink(message);
            }
        }

        binding.subjects = merge(&binding.subjects, &request.subjects);
        let binding = self.persist(binding, exists).await?;

        Ok(self.outcome(binding, warning, !exists))
    }

    /// Take the request's role away from its subjects
    ///
    /// Without an explicit binding name this always acts on the binding named
    /// after the role and fails with `NotFound` when it is absent.
    pub async fn remove_role(
        &self,
        request: &ModificationRequest,
    ) -> PolicyResult<ModificationOutcome> {
        request.validate()?;
        let accessor = self.accessor();
        let role = accessor.role_ref(&request.role_name, request.role_namespace.as_deref());

        let target = BindingResolver::new(accessor)
            .resolve(Action::Remove, &role, request.explicit_binding_name())
            .await?;

        let mut binding = accessor.get_binding(target.name()).await?;
        ensure_grants(&binding, &role)?;

        binding.subjects = subtract(&binding.subjects, &request.subjects);
        let binding = self.persist(binding, true).await?;

        Ok(self.outcome(binding, None, false))
    }

    /// Write `binding`, or only report it in dry-run mode.
    async fn persist(&self, binding: RoleBinding, exists: bool) -> PolicyResult<RoleBinding> {
        let accessor = self.accessor();

        if self.dry_run {
            debug!(
                scope = %accessor.scope(),
                binding = %binding.name(),
                "Dry run, skipping store write"
            );
            return Ok(binding);
        }

        let saved = if exists {
            accessor.update_binding(binding).await?
        } else {
            accessor.create_binding(binding).await?
        };

        if self.audit_logging {
            info!(
                scope = %accessor.scope(),
                binding = %saved.name(),
                role = %saved.role_ref,
                subjects = ?saved.subject_names(),
                created = !exists,
                "Role binding persisted"
            );
        }

        Ok(saved)
    }

    fn outcome(
        &self,
        binding: RoleBinding,
        warning: Option<String>,
        created: bool,
    ) -> ModificationOutcome {
        ModificationOutcome {
            binding_name: binding.metadata.name,
            subjects: binding.subjects,
            warning,
            created,
            dry_run: self.dry_run,
        }
    }
}

/// The role reference of a binding is immutable, so a binding granting some
/// other role can never be the target.
fn ensure_grants(binding: &RoleBinding, role: &RoleRef) -> PolicyResult<()> {
    if binding.role_ref.name != role.name {
        return Err(PolicyError::RoleRefMismatch {
            binding: binding.name().to_string(),
            found: binding.role_ref.name.clone(),
            requested: role.name.clone(),
        });
    }
    Ok(())
}

/// Builder for [`RoleModifier`]
pub struct RoleModifierBuilder {
    accessor: Arc<dyn RoleBindingAccessor>,
    dry_run: bool,
    audit_logging: bool,
    warning_sink: Option<WarningSink>,
}

impl RoleModifierBuilder {
    pub fn new(accessor: Arc<dyn RoleBindingAccessor>) -> Self {
        Self {
            accessor,
            dry_run: false,
            audit_logging: false,
            warning_sink: None,
        }
    }

    /// Compute outcomes without writing to the store
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Log every persisted binding change
    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit_logging = enabled;
        self
    }

    /// Deliver advisory warnings to `sink` as well as the outcome
    pub fn with_warning_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.warning_sink = Some(Arc::new(sink));
        self
    }

    /// Take dry-run and audit settings from `config`
    pub fn with_config(mut self, config: &ModifierConfig) -> Self {
        self.dry_run = config.dry_run;
        self.audit_logging = config.audit_logging;
        self
    }

    /// Build the modifier
    pub fn build(self) -> RoleModifier {
        RoleModifier {
            accessor: self.accessor,
            dry_run: self.dry_run,
            audit_logging: self.audit_logging,
            warning_sink: self.warning_sink,
        }
    }
}
