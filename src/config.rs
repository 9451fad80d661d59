//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/value2md/value2md.toml`
//! 3. Local config: `<dir>/.value2md.toml` (usually the working directory)
//! 4. Explicit config file (`--config`)
//! 5. Environment variables: `VALUE2MD_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::format::InputFormat;
use crate::application::ApplicationError;
use crate::domain::{TagMapping, DEFAULT_MAX_DEPTH, DEFAULT_TITLE_LEVEL, TAG_NEGATION};
use crate::util::path::expand_env_vars;

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub title_level: Option<usize>,
    pub max_depth: Option<usize>,
    pub input_format: Option<InputFormat>,
    pub mapping_file: Option<PathBuf>,
    pub tags: Option<BTreeMap<String, String>>,
}

/// Unified configuration for value2md.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Nesting depth still rendered as heading in level mode (default: 2)
    pub title_level: usize,
    /// Deepest accepted container nesting (default: 100)
    pub max_depth: usize,
    /// Input format when it cannot be taken from the file extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_format: Option<InputFormat>,
    /// Tag mapping file loaded for every conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_file: Option<PathBuf>,
    /// Default tag mapping (key → tag); non-empty selects mapping mode
    pub tags: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title_level: DEFAULT_TITLE_LEVEL,
            max_depth: DEFAULT_MAX_DEPTH,
            input_format: None,
            mapping_file: None,
            tags: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for value2md.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "value2md").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("value2md.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".value2md.toml")
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
    /// Merge tag tables: overlay entries win per key, `"!"` removes the key.
    ///
    /// # Examples
    /// ```ignore
    /// merge_tags({a: h1}, {b: p})     // → {a: h1, b: p}
    /// merge_tags({a: h1}, {a: "!"})   // → {}
    /// ```
    pub fn merge_tags(
        base: &BTreeMap<String, String>,
        overlay: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        let mut result = base.clone();
        for (key, tag) in overlay {
            if tag == TAG_NEGATION {
                result.remove(key);
            } else {
                result.insert(key.clone(), tag.clone());
            }
        }
        result
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Tags: per-key union with negation support
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            title_level: overlay.title_level.unwrap_or(self.title_level),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            input_format: overlay.input_format.or(self.input_format),
            mapping_file: overlay
                .mapping_file
                .clone()
                .or_else(|| self.mapping_file.clone()),
            tags: overlay
                .tags
                .as_ref()
                .map(|o| Self::merge_tags(&self.tags, o))
                .unwrap_or_else(|| self.tags.clone()),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.mapping_file {
            let expanded = expand_env_vars(path.to_string_lossy().as_ref());
            self.mapping_file = Some(PathBuf::from(expanded));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.value2md.toml`
    /// * `explicit` - Config file given on the command line; must exist
    pub fn load(
        local_dir: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("load: explicit config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current, env_source())?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply VALUE2MD_* environment variables as explicit overrides.
    ///
    /// `VALUE2MD_TAGS__<KEY>=<tag>` sets a single tag entry. A variable that is
    /// set but cannot be parsed is an error.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "title_level")? {
            settings.title_level = val;
        }
        if let Some(val) = env_value::<usize>(&config, "max_depth")? {
            settings.max_depth = val;
        }
        if let Some(val) = env_value::<String>(&config, "input_format")? {
            let format = val
                .parse::<InputFormat>()
                .map_err(|message| ApplicationError::Config { message })?;
            settings.input_format = Some(format);
        }
        if let Some(val) = env_value::<String>(&config, "mapping_file")? {
            settings.mapping_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value::<BTreeMap<String, String>>(&config, "tags")? {
            settings.tags = Self::merge_tags(&settings.tags, &val);
        }

        Ok(settings)
    }

    /// Default tag mapping as configured.
    pub fn tag_mapping(&self) -> TagMapping {
        self.tags.iter().collect()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# value2md configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/value2md/value2md.toml
#   Local:    ./.value2md.toml
#   Explicit: --config <FILE>
#   Env:      VALUE2MD_* environment variables (VALUE2MD_TAGS__<KEY>=<tag>)
#
# Tag tables merge per key across layers; later layers win.
# Use "!" as tag to REMOVE an inherited key:
#   [tags]
#   subtitle = "!"
# The same works in mapping files (--mapping) and tag pairs (-t subtitle=!).

# Nesting depth still rendered as heading in level mode
# title_level = 2

# Deepest accepted nesting of mappings and lists
# max_depth = 100

# Input format when the file extension does not tell (json, yaml, toml)
# input_format = "json"

# Tag mapping file applied to every conversion
# mapping_file = "~/.config/value2md/tags.toml"

[tags]
# A non-empty table switches to mapping mode: only mapped keys are rendered.
# Tags: h1..h9 (heading), p (paragraph), li (list item), img (image)
# title = "h1"
# summary = "p"
# feature = "li"
# screenshot = "img"
"#
        .to_string()
    }
}

/// `VALUE2MD_*` variables of the process environment.
fn env_source() -> Environment {
    Environment::with_prefix("VALUE2MD")
        .prefix_separator("_")
        .separator("__")
}

/// Read `key`; `None` when unset, an error when set but not parseable.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("VALUE2MD_{}: {}", key.to_ascii_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
