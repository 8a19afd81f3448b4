//! Integration tests for layered Settings loading.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise defaults, the local `.matnav.toml` and path resolution.

use std::fs;

use tempfile::TempDir;

use matnav::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults_anchored_at_project() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(
        settings.tree_file,
        project.path().join("material_tree.json")
    );
    assert_eq!(settings.report_prefix, "selection_report");
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        r#"
tree_file = "data/tree.json"
report_prefix = "auswahl"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert: relative paths resolve against the project, unset keys keep defaults
    assert_eq!(settings.tree_file, project.path().join("data/tree.json"));
    assert_eq!(settings.report_prefix, "auswahl");
    assert_eq!(settings.report_dir, project.path().join("."));
}

#[test]
fn given_absolute_report_dir_when_load_then_kept() {
    // Arrange
    let project = TempDir::new().unwrap();
    let reports = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        format!("report_dir = {:?}\n", reports.path().display().to_string()),
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(project.path())).expect("load settings");

    // Assert
    assert_eq!(settings.report_dir, reports.path());
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "tree_file = [unclosed").unwrap();

    // Act
    let result = Settings::load(Some(project.path()));

    // Assert
    let err = result.unwrap_err();
    assert!(err.to_string().contains(".matnav.toml"), "error: {err}");
}

#[test]
fn given_template_when_parsing_then_valid_toml() {
    let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
    assert_eq!(parsed, Settings::default());
}
