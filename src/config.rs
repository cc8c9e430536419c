//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sober/sober.toml`
//! 3. Local config: `<project_dir>/.sober.toml`
//! 4. Environment variables: `SOBER_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::DEFAULT_MAX_LEVEL;
use crate::application::ApplicationError;

/// UI languages with translated brick type names.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "de"];

/// Unified configuration for sober.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Fixture file holding the bricks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Safety bound on traversal depth
    pub max_level: usize,
    /// Deepest relative level shown when rendering a tree
    pub max_rlevel: usize,
    /// UI language ("en" or "de")
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            max_level: DEFAULT_MAX_LEVEL,
            max_rlevel: 8,
            language: "en".to_string(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub max_level: Option<usize>,
    pub max_rlevel: Option<usize>,
    pub language: Option<String>,
}

/// Get the XDG config directory for sober.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sober").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sober.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".sober.toml")
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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
    /// Merge overlay config onto self (base): overlay wins where specified.
    ///
    /// A relative `data_file` is resolved against `base_dir`, the directory
    /// of the config file it came from.
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let data_file = overlay.data_file.as_ref().map(|p| {
            let expanded = PathBuf::from(expand_env_vars(&p.to_string_lossy()));
            match base_dir {
                Some(dir) if expanded.is_relative() => dir.join(expanded),
                _ => expanded,
            }
        });
        Self {
            data_file: data_file.or_else(|| self.data_file.clone()),
            max_level: overlay.max_level.unwrap_or(self.max_level),
            max_rlevel: overlay.max_rlevel.unwrap_or(self.max_rlevel),
            language: overlay
                .language
                .clone()
                .unwrap_or_else(|| self.language.clone()),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            let expanded = expand_env_vars(data_file.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Project-local config
        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(project));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply SOBER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("SOBER"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_int("max_level") {
            settings.max_level = to_level("SOBER_MAX_LEVEL", val)?;
        }
        if let Ok(val) = config.get_int("max_rlevel") {
            settings.max_rlevel = to_level("SOBER_MAX_RLEVEL", val)?;
        }
        if let Ok(val) = config.get_string("language") {
            settings.language = val;
        }

        Ok(settings)
    }

    /// Reject values the tree engine cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_level == 0 {
            return Err(ApplicationError::Config {
                message: "max_level must be at least 1".to_string(),
            });
        }
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            return Err(ApplicationError::Config {
                message: format!(
                    "unsupported language '{}' (expected one of: {})",
                    self.language,
                    SUPPORTED_LANGUAGES.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# sober configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/sober/sober.toml
#   Local:  <project_dir>/.sober.toml
#   Env:    SOBER_* environment variables (explicit overrides)

# Fixture file with the bricks (relative paths are resolved against the config file's directory)
# data_file = "sober_data.json"

# Safety bound on traversal depth
# max_level = 20

# Deepest level shown below the requested brick
# max_rlevel = 8

# UI language: "en" or "de"
# language = "en"
"#
        .to_string()
    }
}

fn to_level(name: &str, val: i64) -> Result<usize, ApplicationError> {
    usize::try_from(val).map_err(|_| ApplicationError::Config {
        message: format!("{name} must not be negative: {val}"),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
