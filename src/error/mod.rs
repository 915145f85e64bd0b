// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!      EnvrunError (~16 bytes)
//!               |
//!     +---------+---------+
//!     |         |         |
//!     v         v         v
//!    Env       Cfg       Proc
//!    Box       Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Env     MalformedAssignment, EmptyKey, KeyContainsMarker,
//!           UnterminatedQuote, ExpansionLimit,
//!           FileNotFound, FileRead, Line
//!   Config  ParseError, InvalidValue
//!   Process ExecutableNotFound, SpawnFailed, MissingCommand
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvrunError`].
pub type EnvrunResult<T> = std::result::Result<T, EnvrunError>;

/// Result type for the resolution engine.
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~16 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvrunError {
    /// Environment resolution failed.
    #[error("env error: {0}")]
    Env(#[from] Box<EnvError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvrunError {
                fn from(err: $error) -> Self {
                    EnvrunError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    EnvError => Env,
    ConfigError => Config,
    ProcessError => Process,
}

// --- Env Errors ---

/// Errors raised while resolving assignments and loading env files.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The line does not hold exactly one `=`.
    #[error("invalid environment variable value: {line}{}", hint.map(|h| format!("\n{h}")).unwrap_or_default())]
    MalformedAssignment {
        line: String,
        hint: Option<&'static str>,
    },

    /// Nothing left of the `=` once whitespace is trimmed.
    #[error("environment variable key not found: {line}")]
    EmptyKey { line: String },

    /// The key holds a reference marker.
    #[error("environment variable key should not have '$' char: {key}")]
    KeyContainsMarker { key: String },

    /// An odd number of backticks in a value.
    #[error("quote(`) not terminated: {text}")]
    UnterminatedQuote { text: String },

    /// Reference expansion did not settle within the configured cap.
    #[error("variable expansion exceeded {limit} substitutions: {text}")]
    ExpansionLimit { limit: usize, text: String },

    /// Env file does not exist.
    #[error("env file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Env file exists but could not be read.
    #[error("failed to read env file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an env or env-set file failed to resolve.
    #[error("{}:{line}: {source}", path.display())]
    Line {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<EnvError>,
    },
}

impl EnvError {
    /// Returns the underlying error, looking through [`EnvError::Line`].
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Line { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns true if the error is a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::FileNotFound { .. })
    }

    /// Attaches a file position to the error.
    pub(crate) fn at_line(self, path: impl Into<PathBuf>, line: usize) -> Self {
        Self::Line {
            path: path.into(),
            line,
            source: Box::new(self),
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or merge configuration sources.
    #[error("failed to load configuration: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No program was given on the command line.
    #[error("need command to run")]
    MissingCommand,
}
