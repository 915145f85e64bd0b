// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordered environment list.
//!
//! ```text
//! EnvList ["PATH=/bin", "A=1", "A=2"]
//!   get("A")  --> scan from the end --> "2"
//!   entries() --> every entry, nothing replaced
//! ```

use std::fmt;

/// An ordered list of `KEY=VALUE` entries.
///
/// Entries are only ever appended. Lookups walk the list backwards so the
/// latest entry for a key wins while earlier ones stay visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvList {
    entries: Vec<String>,
}

impl EnvList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: impl Into<String>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    /// Looks up the value of the most recent entry for `name`.
    ///
    /// Keys and values are compared and returned trimmed. Entries that do
    /// not split into exactly one key and one value are skipped.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().rev().find_map(|entry| {
            let (key, value) = split_strict(entry)?;
            (key.trim() == name).then(|| value.trim())
        })
    }

    /// Returns every entry in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Splits each entry at its first `=` for handing to a child process.
    ///
    /// Entries without `=` or with an empty key are left out.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.split_once('='))
            .filter(|(key, _)| !key.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

/// Splits `KEY=VALUE`, rejecting entries with zero or several `=`.
fn split_strict(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('=');
    let key = parts.next()?;
    let value = parts.next()?;
    parts.next().is_none().then_some((key, value))
}

impl<S: Into<String>> FromIterator<S> for EnvList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for EnvList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for EnvList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Vec<String>> for EnvList {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl fmt::Display for EnvList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
