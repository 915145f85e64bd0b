// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for envrun.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, SeparatorsConfig, ExpandConfig, SourcesConfig
//! PrintFormat: plain (default) | json
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::env::resolver::DEFAULT_MAX_EXPANSIONS;
use crate::core::env::separators::Separators;
use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Output format for printed environment entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PrintFormat {
    /// One `KEY=VALUE` per line.
    #[default]
    Plain,
    /// A JSON array of `KEY=VALUE` strings.
    Json,
}

impl std::fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for PrintFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "print_format".to_string(),
                message: format!("expected 'plain' or 'json', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Format used when printing resolved entries.
    pub print_format: PrintFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            print_format: PrintFormat::Plain,
        }
    }
}

/// Separator overrides; unset fields use the host's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeparatorsConfig {
    /// Replacement for `/` in values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Replacement for `:` in values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
}

impl SeparatorsConfig {
    /// Resolves the configured separators on top of the host's.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an override is not exactly one
    /// character.
    pub fn resolve(&self) -> std::result::Result<Separators, ConfigError> {
        let mut separators = Separators::host();
        if let Some(path) = &self.path {
            separators = separators.with_path(single_char("path", path)?);
        }
        if let Some(list) = &self.list {
            separators = separators.with_list(single_char("list", list)?);
        }
        Ok(separators)
    }
}

fn single_char(key: &str, value: &str) -> std::result::Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidValue {
            section: "separators".to_string(),
            key: key.to_string(),
            message: format!("expected a single character, got '{value}'"),
        }),
    }
}

/// Reference expansion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpandConfig {
    /// Substitutions allowed while expanding one value (0 = unlimited).
    pub max_expansions: usize,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Sources applied before the ones given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Inline assignments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    /// Env files (`?` marks optional ones).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub envfile: Vec<String>,
    /// Env-set files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub envset: Vec<String>,
}
