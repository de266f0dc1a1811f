//! Integration tests for Settings layering and directory anchoring.
//!
//! Layers are passed explicitly so that a user's global config or
//! TAXONOMY_* variables do not leak into the assertions.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use taxonomy_json::application::ApplicationError;
use taxonomy_json::config::{local_config_path, Settings};
use taxonomy_json::domain::ParentScope;

fn no_env() -> Option<config::Map<String, String>> {
    Some(config::Map::new())
}

#[test]
fn given_local_config_with_relative_dirs_when_load_then_anchored_at_config_dir() {
    let project = TempDir::new().unwrap();
    let config_path = local_config_path(project.path());
    fs::write(
        &config_path,
        r#"
data_dir = "input"
output_dir = "/abs/out"
"#,
    )
    .unwrap();

    let settings =
        Settings::load_layers(None, Some(&config_path), no_env(), &PathBuf::from("/cwd")).unwrap();

    assert_eq!(settings.data_dir, project.path().join("input"));
    assert_eq!(settings.output_dir, PathBuf::from("/abs/out"));
}

#[test]
fn given_global_and_local_when_load_then_local_wins_and_unset_keys_inherit() {
    let global_dir = TempDir::new().unwrap();
    let local_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("taxonomy-json.toml");
    let local = local_dir.path().join("taxonomy-json.toml");
    fs::write(
        &global,
        r#"
name_column = "Category"
level_column = "Level"
carry_stale_parents = true
"#,
    )
    .unwrap();
    fs::write(&local, "level_column = \"Tier\"\n").unwrap();

    let settings =
        Settings::load_layers(Some(&global), Some(&local), no_env(), &PathBuf::from("/cwd"))
            .unwrap();

    assert_eq!(settings.name_column, "Category");
    assert_eq!(settings.level_column, "Tier");
    assert_eq!(settings.parent_scope(), ParentScope::Carry);
    assert_eq!(settings.data_dir, PathBuf::from("/cwd/data/ncsesTaxonomy"));
}

#[test]
fn given_env_override_when_load_then_beats_config_files() {
    let dir = TempDir::new().unwrap();
    let local = local_config_path(dir.path());
    fs::write(&local, "extension = \"xlsm\"\n").unwrap();
    let mut env = config::Map::new();
    env.insert("TAXONOMY_EXTENSION".to_string(), "xlsx".to_string());

    let settings =
        Settings::load_layers(None, Some(&local), Some(env), &PathBuf::from("/cwd")).unwrap();

    assert_eq!(settings.extension, "xlsx");
}

#[test]
fn given_single_underscore_env_names_when_load_then_every_key_overrides() {
    let mut env = config::Map::new();
    env.insert("TAXONOMY_DATA_DIR".to_string(), "/srv/in".to_string());
    env.insert("TAXONOMY_OUTPUT_DIR".to_string(), "out".to_string());
    env.insert("TAXONOMY_LEVEL_COLUMN".to_string(), "Tier".to_string());
    env.insert("TAXONOMY_CARRY_STALE_PARENTS".to_string(), "true".to_string());

    let settings = Settings::load_layers(None, None, Some(env), &PathBuf::from("/w")).unwrap();

    assert_eq!(settings.data_dir, PathBuf::from("/srv/in"));
    assert_eq!(settings.output_dir, PathBuf::from("/w/out"));
    assert_eq!(settings.level_column, "Tier");
    assert_eq!(settings.parent_scope(), ParentScope::Carry);
}

#[test]
fn given_double_underscore_env_name_when_load_then_ignored() {
    let mut env = config::Map::new();
    env.insert("TAXONOMY__DATA_DIR".to_string(), "/srv/in".to_string());

    let settings = Settings::load_layers(None, None, Some(env), &PathBuf::from("/w")).unwrap();

    assert_eq!(settings.data_dir, PathBuf::from("/w/data/ncsesTaxonomy"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = local_config_path(dir.path());
    fs::write(&local, "data_dir = [unterminated").unwrap();

    let result = Settings::load_layers(None, Some(&local), no_env(), &PathBuf::from("/cwd"));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("absent.toml")),
        other => panic!("expected config error, got {other:?}"),
    }
}
