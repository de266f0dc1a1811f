//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/taxonomy-json/taxonomy-json.toml`
//! 3. Local config: `./taxonomy-json.toml` or the file given with `--config`
//! 4. Environment variables: `TAXONOMY_*` prefix
//!
//! Relative directories from a config file are anchored at that file's
//! directory; all other relative directories at the working directory.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::ParentScope;

/// File name of global and local config files.
pub const CONFIG_FILE_NAME: &str = "taxonomy-json.toml";

/// Prefix of environment variable overrides, e.g. `TAXONOMY_DATA_DIR`.
pub const ENV_PREFIX: &str = "TAXONOMY";

/// Unified configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the taxonomy workbooks
    pub data_dir: PathBuf,
    /// Directory receiving `taxonomy_hierarchy.json`
    pub output_dir: PathBuf,
    /// Extension of input workbooks (without dot)
    pub extension: String,
    /// Header of the column carrying Area/Broad/Major/Detailed
    pub level_column: String,
    /// Header of the column carrying the category name
    pub name_column: String,
    /// Keep deeper parents open across a new Area/Broad row (legacy behavior)
    pub carry_stale_parents: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/ncsesTaxonomy"),
            output_dir: PathBuf::from("data/taxonomyJson"),
            extension: "xlsx".into(),
            level_column: "Unnamed: 1".into(),
            name_column: "Table 4".into(),
            carry_stale_parents: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub level_column: Option<String>,
    pub name_column: Option<String>,
    pub carry_stale_parents: Option<bool>,
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taxonomy-json").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
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

/// Expand `~`, `$VAR` and `${VAR}`, then anchor a relative result at `anchor`.
pub fn resolve_dir(path: &Path, anchor: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf());
    if expanded.is_absolute() {
        expanded
    } else {
        anchor.join(expanded)
    }
}

impl Settings {
    pub fn parent_scope(&self) -> ParentScope {
        if self.carry_stale_parents {
            ParentScope::Carry
        } else {
            ParentScope::Reset
        }
    }

    /// Overlay a config file layer; its relative directories are anchored at `anchor`.
    fn merge_with(&self, overlay: &RawSettings, anchor: &Path) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .as_deref()
                .map(|p| resolve_dir(p, anchor))
                .unwrap_or_else(|| self.data_dir.clone()),
            output_dir: overlay
                .output_dir
                .as_deref()
                .map(|p| resolve_dir(p, anchor))
                .unwrap_or_else(|| self.output_dir.clone()),
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            level_column: overlay
                .level_column
                .clone()
                .unwrap_or_else(|| self.level_column.clone()),
            name_column: overlay
                .name_column
                .clone()
                .unwrap_or_else(|| self.name_column.clone()),
            carry_stale_parents: overlay
                .carry_stale_parents
                .unwrap_or(self.carry_stale_parents),
        }
    }

    fn merge_file(self, path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        let anchor = path.parent().unwrap_or_else(|| Path::new("."));
        debug!("merging config layer {}", path.display());
        Ok(self.merge_with(&raw, anchor))
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit local config file; it must exist. Without it,
    ///   `./taxonomy-json.toml` is used when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let cwd = std::env::current_dir().with_path_context("current directory", Path::new("."))?;

        let local = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(local_config_path(&cwd)).filter(|p| p.exists()),
        };
        let global = global_config_path().filter(|p| p.exists());

        Self::load_layers(global.as_deref(), local.as_deref(), None, &cwd)
    }

    /// Merge the given layers on top of the defaults.
    ///
    /// `env` replaces the process environment as source of `TAXONOMY_*`
    /// overrides when given.
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Option<config::Map<String, String>>,
        cwd: &Path,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global {
            current = current.merge_file(path)?;
        }
        if let Some(path) = local {
            current = current.merge_file(path)?;
        }

        current = Self::apply_env_overrides(current, env)?;

        current.data_dir = resolve_dir(&current.data_dir, cwd);
        current.output_dir = resolve_dir(&current.output_dir, cwd);

        Ok(current)
    }

    /// Apply TAXONOMY_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Flat keys: `TAXONOMY_DATA_DIR` maps to `data_dir`
        let builder = Config::builder().add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("extension") {
            settings.extension = val;
        }
        if let Ok(val) = config.get_string("level_column") {
            settings.level_column = val;
        }
        if let Ok(val) = config.get_string("name_column") {
            settings.name_column = val;
        }
        if config.get_string("carry_stale_parents").is_ok() {
            settings.carry_stale_parents =
                config.get_bool("carry_stale_parents").map_err(config_err)?;
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
        r#"# taxonomy-json configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/taxonomy-json/taxonomy-json.toml
#   Local:  ./taxonomy-json.toml (or --config <file>)
#   Env:    TAXONOMY_* environment variables
#
# Relative directories are resolved against the directory of the file
# that sets them.

# Directory with the taxonomy workbooks
# data_dir = "data/ncsesTaxonomy"

# Directory receiving taxonomy_hierarchy.json (must exist)
# output_dir = "data/taxonomyJson"

# Input file extension
# extension = "xlsx"

# Column headers (blank header cells are named "Unnamed: <index>")
# level_column = "Unnamed: 1"
# name_column = "Table 4"

# Keep the previous Broad/Major open when a new Area/Broad starts
# carry_stale_parents = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
