//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/matnav/matnav.toml`
//! 3. Local config: `<project_dir>/.matnav.toml`
//! 4. Environment variables: `MATNAV_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub report_prefix: Option<String>,
}

/// Unified configuration for matnav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Category tree JSON (default: material_tree.json)
    pub tree_file: PathBuf,
    /// Directory receiving written reports (default: project directory)
    pub report_dir: PathBuf,
    /// Report file name prefix, followed by `_<timestamp>.txt`
    pub report_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: PathBuf::from("material_tree.json"),
            report_dir: PathBuf::from("."),
            report_prefix: "selection_report".into(),
        }
    }
}

/// Get the XDG config directory for matnav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "matnav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("matnav.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".matnav.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.tree_file = PathBuf::from(expand_env_vars(&self.tree_file.to_string_lossy()));
        self.report_dir = PathBuf::from(expand_env_vars(&self.report_dir.to_string_lossy()));
    }

    /// Anchor relative paths at the project directory.
    fn resolve_relative_to(&mut self, project_dir: &Path) {
        if self.tree_file.is_relative() {
            self.tree_file = project_dir.join(&self.tree_file);
        }
        if self.report_dir.is_relative() {
            self.report_dir = project_dir.join(&self.report_dir);
        }
    }

    /// Overlay config onto self (base): specified fields win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay
                .tree_file
                .clone()
                .unwrap_or_else(|| self.tree_file.clone()),
            report_dir: overlay
                .report_dir
                .clone()
                .unwrap_or_else(|| self.report_dir.clone()),
            report_prefix: overlay
                .report_prefix
                .clone()
                .unwrap_or_else(|| self.report_prefix.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding the local config; relative paths
    ///   resolve against it (current directory when `None`)
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/matnav/matnav.toml`
    /// 3. Local config: `<project_dir>/.matnav.toml`
    /// 4. Environment variables: `MATNAV_*` prefix
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        if let Some(project) = project_dir {
            current.resolve_relative_to(project);
        }

        Ok(current)
    }

    /// Apply MATNAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MATNAV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("report_dir") {
            settings.report_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("report_prefix") {
            settings.report_prefix = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# matnav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/matnav/matnav.toml
#   Local:  <project_dir>/.matnav.toml
#   Env:    MATNAV_* environment variables (e.g. MATNAV_TREE_FILE)
#
# Relative paths are resolved against the project directory.

# Category tree (JSON list of {"name": ..., "children": [...]})
# tree_file = "material_tree.json"

# Directory for written reports
# report_dir = "."

# Report file name prefix: <prefix>_<YYYY-MM-DD_HH-MM-SS>.txt
# report_prefix = "selection_report"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
