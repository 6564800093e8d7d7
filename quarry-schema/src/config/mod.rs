//! Configuration file parsing for `quarry.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};
use crate::naming::FieldNaming;

/// Main configuration structure for `quarry.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuarryConfig {
    /// Schema file configuration.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Filter serialization settings.
    #[serde(default)]
    pub serializer: SerializerConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl QuarryConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);

        let config: Self = toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the TOML types alone cannot constrain.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.schema.path.trim().is_empty() {
            return Err(config_error("schema.path must not be empty"));
        }
        if self.serializer.path_cache_capacity == 0 {
            return Err(config_error("serializer.path_cache_capacity must be at least 1"));
        }
        if let Some(level) = &self.debug.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(config_error(format!(
                    "debug.log_level `{}` is not one of {}",
                    level,
                    LOG_LEVELS.join(", ")
                )));
            }
        }
        if !LOG_FORMATS.contains(&self.debug.log_format.to_lowercase().as_str()) {
            return Err(config_error(format!(
                "debug.log_format `{}` is not one of {}",
                self.debug.log_format,
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> Self {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(serializer) = overrides.serializer {
                if let Some(naming) = serializer.field_naming {
                    self.serializer.field_naming = naming;
                }
                if let Some(path_cache) = serializer.path_cache {
                    self.serializer.path_cache = path_cache;
                }
                if let Some(capacity) = serializer.path_cache_capacity {
                    self.serializer.path_cache_capacity = capacity;
                }
            }
            if let Some(debug) = overrides.debug {
                if let Some(level) = debug.log_level {
                    self.debug.log_level = Some(level);
                }
                if let Some(format) = debug.log_format {
                    self.debug.log_format = format;
                }
            }
        }
        self
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

fn config_error(message: impl Into<String>) -> SchemaError {
    SchemaError::ConfigError {
        message: message.into(),
    }
}

/// Schema file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Path to the schema file.
    #[serde(default = "default_schema_path")]
    pub path: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

fn default_schema_path() -> String {
    "schema.quarry".to_string()
}

/// Serializer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SerializerConfig {
    /// Naming convention for resolved field paths.
    #[serde(default)]
    pub field_naming: FieldNaming,

    /// Memoize resolved field paths.
    #[serde(default = "default_true")]
    pub path_cache: bool,

    /// Maximum number of memoized paths before the least used are evicted.
    #[serde(default = "default_path_cache_capacity")]
    pub path_cache_capacity: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            field_naming: FieldNaming::default(),
            path_cache: true,
            path_cache_capacity: default_path_cache_capacity(),
        }
    }
}

fn default_true() -> bool { true }

fn default_path_cache_capacity() -> usize { 1024 }

/// Debug/logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub log_level: Option<String>,

    /// Log output format (`json`, `pretty`, `compact`).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_format: default_log_format(),
        }
    }
}

fn default_log_format() -> String { "json".to_string() }

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Serializer overrides.
    pub serializer: Option<SerializerOverride>,

    /// Debug overrides.
    pub debug: Option<DebugOverride>,
}

/// Serializer configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SerializerOverride {
    /// Override field_naming.
    pub field_naming: Option<FieldNaming>,

    /// Override path_cache.
    pub path_cache: Option<bool>,

    /// Override path_cache_capacity.
    pub path_cache_capacity: Option<usize>,
}

/// Debug configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverride {
    /// Override log_level.
    pub log_level: Option<String>,

    /// Override log_format.
    pub log_format: Option<String>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unset variables are left untouched.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return result;
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let full_match = &cap[0];

        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(full_match, &value);
        }
    }

    result
}
