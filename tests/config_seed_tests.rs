//! Tests driving the modifier from configuration and seed files

use anyhow::Result;
use rolebind::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

const SEED: &str = r#"{
  "clusterRoles": [{ "metadata": { "name": "view" } }],
  "roles": [{ "metadata": { "name": "edit", "namespace": "team-a" } }],
  "roleBindings": [{
    "metadata": { "name": "edit", "namespace": "team-a" },
    "roleRef": { "name": "edit", "namespace": "team-a" },
    "subjects": [{ "kind": "User", "name": "foo" }]
  }]
}"#;

fn write_fixtures(dir: &TempDir, config: &ModifierConfig) -> Result<(String, String)> {
    let seed_path = dir.path().join("seed.json");
    std::fs::write(&seed_path, SEED)?;

    let config_path = dir.path().join("config.json");
    let config_path = config_path.to_string_lossy().into_owned();
    config.to_file(&config_path)?;

    Ok((seed_path.to_string_lossy().into_owned(), config_path))
}

fn team_a() -> ModifierConfig {
    ModifierConfig {
        scope: ScopeConfig::Namespace {
            namespace: Some("team-a".to_string()),
        },
        ..ModifierConfig::default()
    }
}

#[tokio::test]
async fn test_seeded_namespace_add_and_remove() -> Result<()> {
    let dir = TempDir::new()?;
    let (seed_path, config_path) = write_fixtures(&dir, &team_a())?;

    let client = InMemoryAuthorizationClient::from_seed(StoreSeed::from_file(&seed_path)?);
    let config = ModifierConfig::from_file(&config_path)?;
    let modifier = RoleModifier::from_config(&config, Arc::new(client.clone()))?;
    assert_eq!(modifier.accessor().scope(), Scope::Namespace("team-a".to_string()));

    let outcome = modifier
        .apply(
            &ModificationRequest::add("edit")
                .with_role_namespace("team-a")
                .with_users(["bar"]),
        )
        .await?;
    assert_eq!(outcome.binding_name, "edit");
    assert!(!outcome.created);
    assert_eq!(outcome.warning, None);
    assert_eq!(outcome.subject_names(), vec!["foo", "bar"]);

    modifier
        .apply(
            &ModificationRequest::remove("edit")
                .with_role_namespace("team-a")
                .with_users(["foo"]),
        )
        .await?;

    let stored = client.get_role_binding("team-a", "edit").await?;
    assert_eq!(stored.subject_names(), vec!["bar"]);
    Ok(())
}

#[tokio::test]
async fn test_cluster_role_and_local_role_bindings_do_not_mix() -> Result<()> {
    let dir = TempDir::new()?;
    let (seed_path, config_path) = write_fixtures(&dir, &team_a())?;

    let client = InMemoryAuthorizationClient::from_seed(StoreSeed::from_file(&seed_path)?);
    let config = ModifierConfig::from_file(&config_path)?;
    let modifier = RoleModifier::from_config(&config, Arc::new(client.clone()))?;

    let before = client.resource_version().await;

    // a reference to cluster role "edit" is not the local role of that name,
    // and the binding named "edit" already grants the local role
    let err = modifier
        .apply(&ModificationRequest::add("edit").with_users(["baz"]))
        .await
        .unwrap_err();
    assert!(matches!(err, PolicyError::Store(StoreError::AlreadyExists { .. })));

    assert_eq!(client.resource_version().await, before);
    let bindings = client.list_role_bindings("team-a").await?;
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].role_ref, RoleRef::local("team-a", "edit"));
    assert_eq!(bindings[0].subject_names(), vec!["foo"]);
    Ok(())
}

#[tokio::test]
async fn test_development_config_is_dry_run() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ModifierConfig::development();
    let (seed_path, config_path) = write_fixtures(&dir, &config)?;

    let client = InMemoryAuthorizationClient::from_seed(StoreSeed::from_file(&seed_path)?);
    let before = client.resource_version().await;
    let config = ModifierConfig::from_file(&config_path)?;
    let modifier = RoleModifier::from_config(&config, Arc::new(client.clone()))?;

    let outcome = modifier
        .apply(&ModificationRequest::add("view").with_groups(["auditors"]))
        .await?;
    assert!(outcome.dry_run);
    assert!(outcome.created);
    assert_eq!(outcome.binding_name, "view");

    assert_eq!(client.resource_version().await, before);
    assert!(client.list_role_bindings(DEFAULT_NAMESPACE).await?.is_empty());
    Ok(())
}

#[test]
fn test_invalid_seed_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("seed.json");
    std::fs::write(
        &path,
        r#"{ "clusterRoles": [{ "metadata": { "name": "view" } }, { "metadata": { "name": "view" } }] }"#,
    )?;

    assert!(StoreSeed::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "defaultNamespace": "" }"#)?;

    let err = ModifierConfig::from_file(&path.to_string_lossy()).unwrap_err();
    assert!(matches!(err, PolicyError::Configuration(_)));
    Ok(())
}
