// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Env file and env-set file loading.
//!
//! ```text
//! site.envs (env-set)                 base.env (env file)
//!   # comment                           # comment
//!   $ROOT/env/all.env                   ROOT=`Z:`/vfx
//!   ?$ROOT/env/$PROGRAM.env             TOOLS=$ROOT/tools
//!        |                                   |
//!        v                                   v
//!   convert() per line                  parse_assignment() per line
//!   EnvFileSpec { path, optional }      against env + earlier lines
//! ```
//!
//! Files are read whole. A bad line aborts the file; nothing parsed before
//! it is returned.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::list::EnvList;
use super::resolver::Resolver;
use crate::error::{EnvError, EnvResult};

/// Starts a comment line.
pub const COMMENT: char = '#';

/// Marks a file path as optional when it leads or trails the path.
pub const OPTIONAL: char = '?';

/// A file to load, with its optional flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFileSpec {
    path: PathBuf,
    optional: bool,
}

impl EnvFileSpec {
    /// A file that must exist.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            optional: false,
        }
    }

    /// A file that may be missing.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            optional: true,
        }
    }

    /// Parses a path, treating leading or trailing `?` as the optional marker.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let optional = text.starts_with(OPTIONAL) || text.ends_with(OPTIONAL);
        Self {
            path: PathBuf::from(text.trim_matches(OPTIONAL)),
            optional,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for EnvFileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if self.optional {
            write!(f, "{OPTIONAL}")?;
        }
        Ok(())
    }
}

impl From<&str> for EnvFileSpec {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Reads a file as UTF-8, telling a missing file apart from other failures.
fn read_text(path: &Path) -> EnvResult<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            EnvError::FileNotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            EnvError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Yields `(line number, trimmed line)` for every non-blank, non-comment line.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(COMMENT))
}

impl Resolver {
    /// Resolves the assignments in `text`, as read from `origin`.
    ///
    /// Each line is resolved against `env` followed by the entries of the
    /// lines before it. `env` itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first line's error wrapped in [`EnvError::Line`].
    pub fn parse_env_text(
        &self,
        origin: &Path,
        text: &str,
        env: &EnvList,
    ) -> EnvResult<Vec<String>> {
        let mut scope = env.clone();
        let mut parsed = Vec::new();

        for (number, line) in content_lines(text) {
            let entry = self
                .parse_assignment(line, &scope)
                .map_err(|err| err.at_line(origin, number))?;
            trace!(file = %origin.display(), line = number, entry = %entry, "resolved");
            scope.push(entry.clone());
            parsed.push(entry);
        }

        Ok(parsed)
    }

    /// Loads an env file and resolves its assignments.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::FileNotFound`] or [`EnvError::FileRead`] when the
    /// file cannot be read, or the first line error.
    pub fn load_env_file(&self, path: impl AsRef<Path>, env: &EnvList) -> EnvResult<Vec<String>> {
        let path = path.as_ref();
        debug!(file = %path.display(), "loading env file");
        let text = read_text(path)?;
        self.parse_env_text(path, &text, env)
    }

    /// Loads an env file, yielding nothing for a missing optional file.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::load_env_file`], except that a missing optional
    /// file is not an error.
    pub fn load_env_spec(&self, spec: &EnvFileSpec, env: &EnvList) -> EnvResult<Vec<String>> {
        match self.load_env_file(spec.path(), env) {
            Err(EnvError::FileNotFound { path, .. }) if spec.is_optional() => {
                debug!(file = %path.display(), "optional env file not found, skipping");
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Resolves the file list in env-set `text`, as read from `origin`.
    ///
    /// Every line is converted like an assignment value, so references and
    /// separator normalization apply to the path, then parsed into an
    /// [`EnvFileSpec`].
    ///
    /// # Errors
    ///
    /// Returns the first line's conversion error wrapped in [`EnvError::Line`].
    pub fn parse_envset_text(
        &self,
        origin: &Path,
        text: &str,
        env: &EnvList,
    ) -> EnvResult<Vec<EnvFileSpec>> {
        content_lines(text)
            .map(|(number, line)| {
                self.convert(line, env)
                    .map(|path| EnvFileSpec::parse(&path))
                    .map_err(|err| err.at_line(origin, number))
            })
            .collect()
    }

    /// Loads an env-set file and returns the env files it lists.
    ///
    /// # Errors
    ///
    /// Returns a read error unless the set file is optional and missing, or
    /// the first line error.
    pub fn load_envset_file(
        &self,
        spec: &EnvFileSpec,
        env: &EnvList,
    ) -> EnvResult<Vec<EnvFileSpec>> {
        debug!(file = %spec.path().display(), "loading env-set file");
        let text = match read_text(spec.path()) {
            Ok(text) => text,
            Err(EnvError::FileNotFound { path, .. }) if spec.is_optional() => {
                debug!(file = %path.display(), "optional env-set file not found, skipping");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        self.parse_envset_text(spec.path(), &text, env)
    }
}
