// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path and list separator normalization.
//!
//! ```text
//! generic     host (Windows)   host (other)
//!   /    -->      \                /
//!   :    -->      ;                :
//! ```

use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;

/// Generic path separator written in env files.
pub const GENERIC_PATH: char = '/';

/// Generic list separator written in env files.
pub const GENERIC_LIST: char = ':';

/// Target separators that generic `/` and `:` are rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    path: char,
    list: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self::host()
    }
}

impl Separators {
    #[must_use]
    pub const fn new(path: char, list: char) -> Self {
        Self { path, list }
    }

    /// Separators of the platform this binary was built for.
    #[must_use]
    pub const fn host() -> Self {
        let list = if cfg!(windows) { ';' } else { ':' };
        Self::new(MAIN_SEPARATOR, list)
    }

    /// Separators that leave text untouched.
    #[must_use]
    pub const fn generic() -> Self {
        Self::new(GENERIC_PATH, GENERIC_LIST)
    }

    #[must_use]
    pub const fn path(&self) -> char {
        self.path
    }

    #[must_use]
    pub const fn list(&self) -> char {
        self.list
    }

    /// Returns a copy with the path separator replaced.
    #[must_use]
    pub const fn with_path(self, path: char) -> Self {
        Self::new(path, self.list)
    }

    /// Returns a copy with the list separator replaced.
    #[must_use]
    pub const fn with_list(self, list: char) -> Self {
        Self::new(self.path, list)
    }

    /// Rewrites every generic separator in `text`.
    ///
    /// Applied to the whole input; callers are responsible for leaving
    /// quoted spans out.
    #[must_use]
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if *self == Self::generic() || !text.contains([GENERIC_PATH, GENERIC_LIST]) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(
            text.chars()
                .map(|c| match c {
                    GENERIC_PATH => self.path,
                    GENERIC_LIST => self.list,
                    other => other,
                })
                .collect(),
        )
    }
}
