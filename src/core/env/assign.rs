// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single `KEY=VALUE` assignment parsing.

use super::expand::MARKER;
use super::list::EnvList;
use super::resolver::Resolver;
use crate::error::{EnvError, EnvResult};

/// File extensions that suggest a file was passed where an assignment was
/// expected, with the matching hint.
const FILE_HINTS: [(&str, &str); 2] = [
    (".env", "you might want to use --envfile?"),
    (".envs", "you might want to use --envset?"),
];

impl Resolver {
    /// Parses one assignment and resolves its value against `env`.
    ///
    /// Key and value are trimmed; the value goes through
    /// [`Resolver::convert`]. Returns the rebuilt `KEY=VALUE` entry.
    ///
    /// # Errors
    ///
    /// - [`EnvError::MalformedAssignment`] unless the line holds exactly one `=`
    /// - [`EnvError::EmptyKey`] if the key is blank
    /// - [`EnvError::KeyContainsMarker`] if the key holds `$`
    /// - [`EnvError::UnterminatedQuote`] / [`EnvError::ExpansionLimit`] from
    ///   value conversion, reported with the whole line
    pub fn parse_assignment(&self, line: &str, env: &EnvList) -> EnvResult<String> {
        let parts: Vec<&str> = line.split('=').collect();
        let [key, value] = parts.as_slice() else {
            let hint = match parts.as_slice() {
                [only] => file_hint(only),
                _ => None,
            };
            return Err(EnvError::MalformedAssignment {
                line: line.to_owned(),
                hint,
            });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(EnvError::EmptyKey {
                line: line.to_owned(),
            });
        }
        if key.contains(MARKER) {
            return Err(EnvError::KeyContainsMarker {
                key: key.to_owned(),
            });
        }

        let value = self
            .convert(value.trim(), env)
            .map_err(|err| with_line(err, line))?;
        Ok(format!("{key}={value}"))
    }
}

fn file_hint(text: &str) -> Option<&'static str> {
    let text = text.trim();
    FILE_HINTS
        .iter()
        .find(|(extension, _)| text.ends_with(extension))
        .map(|&(_, hint)| hint)
}

/// Replaces the value text in a conversion error with the full line.
fn with_line(err: EnvError, line: &str) -> EnvError {
    match err {
        EnvError::UnterminatedQuote { .. } => EnvError::UnterminatedQuote {
            text: line.to_owned(),
        },
        EnvError::ExpansionLimit { limit, .. } => EnvError::ExpansionLimit {
            limit,
            text: line.to_owned(),
        },
        other => other,
    }
}
