//! Configuration management for relabel
//!
//! Settings are resolved in the following order of precedence (highest to lowest):
//! 1. **Environment Variables**: `RELABEL_*`, with `__` separating nested keys
//!    (e.g. `RELABEL_LOGGING__LEVEL=debug`)
//! 2. **Configuration file**: an explicit path, otherwise `relabel.toml` or
//!    `.relabel/config.toml` in the workspace root
//! 3. **Default Values**: the `Default` implementations below
//!
//! # Configuration File Example
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [rename]
//! identifier_pattern = "^[A-Za-z_][A-Za-z0-9_]*$"
//! enforce_identifier_pattern = true
//! ```

pub mod logging;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use relabel_foundation::{RelabelError, RelabelResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config files looked up in the workspace root, first match wins
const CONFIG_FILE_CANDIDATES: [&str; 2] = ["relabel.toml", ".relabel/config.toml"];

/// Prefix for environment overrides
const ENV_PREFIX: &str = "RELABEL_";

/// Names accepted by `C`-family compilers for variables and parameters
pub const DEFAULT_IDENTIFIER_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelabelConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rename: RenameConfig,
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for production
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Rename behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameConfig {
    /// Pattern a replacement name must match for a rename to apply
    pub identifier_pattern: String,
    /// Reject replacement names that do not match `identifier_pattern`.
    /// Off by default, so any non-empty name is accepted.
    pub enforce_identifier_pattern: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            identifier_pattern: DEFAULT_IDENTIFIER_PATTERN.to_string(),
            enforce_identifier_pattern: false,
        }
    }
}

impl RenameConfig {
    /// Compile the identifier pattern, `None` when enforcement is disabled
    pub fn identifier_regex(&self) -> RelabelResult<Option<Regex>> {
        if !self.enforce_identifier_pattern {
            return Ok(None);
        }
        Regex::new(&self.identifier_pattern).map(Some).map_err(|e| {
            RelabelError::config(format!(
                "Invalid identifier pattern '{}': {}",
                self.identifier_pattern, e
            ))
        })
    }
}

impl RelabelConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// When `explicit_file` is given it must exist; otherwise the first of
    /// `relabel.toml` and `.relabel/config.toml` found under `workspace_root`
    /// is used, if any.
    pub fn load(workspace_root: &Path, explicit_file: Option<&Path>) -> RelabelResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(RelabelConfig::default()));

        match explicit_file {
            Some(path) => {
                if !path.exists() {
                    return Err(RelabelError::config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                tracing::debug!(path = %path.display(), "Loading TOML configuration");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let found = CONFIG_FILE_CANDIDATES
                    .iter()
                    .map(|candidate| workspace_root.join(candidate))
                    .find(|path| path.exists());
                if let Some(path) = found {
                    tracing::debug!(path = %path.display(), "Loading TOML configuration");
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        let config: RelabelConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| RelabelError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;

        tracing::debug!(
            level = %config.logging.level,
            enforce_identifier_pattern = config.rename.enforce_identifier_pattern,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> RelabelResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(RelabelError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        self.rename.identifier_regex()?;

        Ok(())
    }
}
