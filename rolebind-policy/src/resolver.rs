//! Binding target resolution
//!
//! Decides which binding an add or remove acts on when the caller did not
//! name one.
//!
//! Add is conservative. With no binding for the role it creates one named
//! after the role. It only folds new subjects into an existing binding when
//! that binding is the single one granting the role and carries the role's
//! own name. In every other case it creates a new binding under the first
//! free `<role>-N` name rather than guess which of several bindings the
//! caller meant.
//!
//! Remove always targets the binding named after the role, however many other
//! bindings grant it.

use crate::error::PolicyError;
use crate::request::Action;
use rolebind_core::types::RoleRef;
use rolebind_store::accessor::RoleBindingAccessor;
use std::collections::BTreeSet;
use tracing::debug;

/// Binding an operation will act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTarget {
    /// Use the binding with this name if it exists; Add creates it otherwise
    Named(String),
    /// Create a new binding under this name
    Fresh(String),
}

impl BindingTarget {
    /// Name of the target binding
    pub fn name(&self) -> &str {
        match self {
            BindingTarget::Named(name) | BindingTarget::Fresh(name) => name,
        }
    }
}

/// Chooses binding targets by looking at the bindings already in scope
pub struct BindingResolver<'a> {
    accessor: &'a dyn RoleBindingAccessor,
}

impl<'a> BindingResolver<'a> {
    pub fn new(accessor: &'a dyn RoleBindingAccessor) -> Self {
        Self { accessor }
    }

    /// Resolve the target for `action` on `role`
    ///
    /// An explicit name is used verbatim and skips every lookup.
    pub async fn resolve(
        &self,
        action: Action,
        role: &RoleRef,
        explicit_name: Option<&str>,
    ) -> Result<BindingTarget, PolicyError> {
        if let Some(name) = explicit_name {
            return Ok(BindingTarget::Named(name.to_string()));
        }

        match action {
            Action::Add => self.resolve_add(role).await,
            Action::Remove => Ok(BindingTarget::Named(role.name.clone())),
        }
    }

    async fn resolve_add(&self, role: &RoleRef) -> Result<BindingTarget, PolicyError> {
        let existing = self.accessor.list_bindings_for_role(role).await?;

        let target = match existing.as_slice() {
            [only] if only.name() == role.name => BindingTarget::Named(role.name.clone()),
            // a binding for another role holding this name makes the create
            // fail with AlreadyExists
            [] => BindingTarget::Fresh(role.name.clone()),
            _ => {
                let taken = self.accessor.existing_binding_names().await?;
                BindingTarget::Fresh(suffixed_name(&role.name, &taken))
            }
        };

        debug!(
            role = %role,
            candidates = existing.len(),
            binding = %target.name(),
            fresh = matches!(target, BindingTarget::Fresh(_)),
            "Resolved binding target for add"
        );
        Ok(target)
    }
}

/// First `<base>-N`, N counting up from zero, not present in `taken`
pub fn suffixed_name(base: &str, taken: &BTreeSet<String>) -> String {
    let mut n: u64 = 0;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
