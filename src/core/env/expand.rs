// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reference expansion and quote-aware conversion.
//!
//! ```text
//! convert("`https://x`:$HOME/bin")
//!   split on `  -->  ["", "https://x", ":$HOME/bin"]
//!   even index  -->  normalize --> expand
//!   odd index   -->  untouched
//!   join        -->  "https://x;C:\Users\me\bin"   (Windows)
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::list::EnvList;
use super::resolver::Resolver;
use crate::error::{EnvError, EnvResult};

/// Prefix of a variable reference.
pub const MARKER: char = '$';

/// Delimiter of a literal span.
pub const QUOTE: char = '`';

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[0-9A-Za-z_]+").expect("reference pattern is a valid regex")
});

impl Resolver {
    /// Replaces `$NAME` references with their values from `env`.
    ///
    /// The leftmost reference is replaced first and the result is scanned
    /// again from the start, so a substituted value can itself hold
    /// references. Unbound names expand to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ExpansionLimit`] when more substitutions than the
    /// configured cap are needed, which happens for self-referencing values.
    pub fn expand(&self, text: &str, env: &EnvList) -> EnvResult<String> {
        self.expand_counted(text, env, &mut 0)
    }

    /// [`Resolver::expand`] drawing on a budget shared by several calls.
    fn expand_counted(
        &self,
        text: &str,
        env: &EnvList,
        substitutions: &mut usize,
    ) -> EnvResult<String> {
        let mut value = text.to_owned();

        while let Some(found) = REFERENCE.find(&value) {
            if let Some(limit) = self.expansion_limit()
                && *substitutions >= limit
            {
                return Err(EnvError::ExpansionLimit {
                    limit,
                    text: text.to_owned(),
                });
            }

            let range = found.range();
            let name = &value[range.start + MARKER.len_utf8()..range.end];
            let replacement = env.get(name).unwrap_or_default();
            trace!(name, value = replacement, "expand");

            value.replace_range(range, replacement);
            *substitutions += 1;
        }

        Ok(value)
    }

    /// Normalizes separators and expands references outside backtick spans.
    ///
    /// Backtick-quoted spans are copied verbatim and the backticks dropped.
    /// Values substituted during expansion are not normalized again. The
    /// expansion cap applies to the whole value, across all unquoted spans.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnterminatedQuote`] for an odd number of
    /// backticks, or any error from [`Resolver::expand`].
    pub fn convert(&self, value: &str, env: &EnvList) -> EnvResult<String> {
        let segments: Vec<&str> = value.split(QUOTE).collect();
        if segments.len().is_multiple_of(2) {
            return Err(EnvError::UnterminatedQuote {
                text: value.to_owned(),
            });
        }

        let separators = self.separators();
        let mut substitutions = 0usize;
        let mut converted = String::with_capacity(value.len());
        for (index, segment) in segments.into_iter().enumerate() {
            if index.is_multiple_of(2) {
                let normalized = separators.normalize(segment);
                converted.push_str(&self.expand_counted(&normalized, env, &mut substitutions)?);
            } else {
                converted.push_str(segment);
            }
        }

        Ok(converted)
    }
}
