// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for envrun.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envrun.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. ENVRUN_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVRUN_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! ENVRUN_SEPARATORS__PATH=/           → separators.path = "/"
//! ENVRUN_EXPAND__MAX_EXPANSIONS=0     → expand.max_expansions = 0
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::env::compose::EnvSources;
use crate::core::env::resolver::Resolver;
use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{ExpandConfig, GlobalConfig, SeparatorsConfig, SourcesConfig};

/// Name of the config file picked up from the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "envrun.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ENVRUN";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Separator overrides.
    pub separators: SeparatorsConfig,
    /// Expansion settings.
    pub expand: ExpandConfig,
    /// Sources applied before command-line ones.
    pub sources: SourcesConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envrun::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envrun.toml")
    ///     .with_env_prefix("ENVRUN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a bad separator override.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.separators.resolve().map(|_| ())
    }

    /// Builds the resolver described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a bad separator override.
    pub fn resolver(&self) -> std::result::Result<Resolver, ConfigError> {
        Ok(Resolver::builder()
            .with_separators(self.separators.resolve()?)
            .with_max_expansions(self.expand.max_expansions)
            .build())
    }

    /// Sources configured in `[sources]`.
    #[must_use]
    pub fn sources(&self) -> EnvSources {
        let mut sources = EnvSources::new();
        for list in &self.sources.env {
            sources = sources.with_assignments(list);
        }
        for list in &self.sources.envset {
            sources = sources.with_envsets(list);
        }
        for list in &self.sources.envfile {
            sources = sources.with_envfiles(list);
        }
        sources
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("global.print_format", self.global.print_format.to_string());
        options.insert(
            "separators.path",
            self.separators.path.clone().unwrap_or_default(),
        );
        options.insert(
            "separators.list",
            self.separators.list.clone().unwrap_or_default(),
        );
        options.insert(
            "expand.max_expansions",
            self.expand.max_expansions.to_string(),
        );
        options.insert("sources.env", self.sources.env.join(","));
        options.insert("sources.envfile", self.sources.envfile.join(","));
        options.insert("sources.envset", self.sources.envset.join(","));

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| {
                format!("{key:<max_key_len$} = {value}")
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}
