// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable templating.
//!
//! # Architecture
//!
//! ```text
//! compose()                      inline / env-set / env file sources
//!    |
//!    v
//! load_env_file()                one file, lines accumulate
//!    |
//!    v
//! parse_assignment()             KEY=VALUE, trimmed
//!    |
//!    v
//! convert()                      split on `, odd segments literal
//!    |            |
//!    v            v
//! normalize()  expand()          / : --> host,  $NAME --> value
//!                 |
//!                 v
//!             EnvList::get()     last entry wins
//! ```
//!
//! - **Append-only**: `EnvList` never replaces entries
//! - **Injected separators**: `Separators` is a value, not a `cfg!`
//! - **Literal spans**: backticks switch off normalization and expansion

use std::ffi::OsString;

use tracing::warn;

pub mod assign;
pub mod compose;
pub mod expand;
pub mod file;
pub mod list;
pub mod resolver;
pub mod separators;

#[cfg(test)]
mod tests;

/// Captures the current process environment as a list.
///
/// Variables whose name or value is not valid UTF-8 are left out with a
/// warning.
#[must_use]
pub fn current_env() -> list::EnvList {
    env_from_os(std::env::vars_os())
}

/// Builds a list from OS pairs, skipping those that are not valid UTF-8.
fn env_from_os(vars: impl IntoIterator<Item = (OsString, OsString)>) -> list::EnvList {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some(format!("{key}={value}")),
            (key, _) => {
                let key = key.unwrap_or_else(|key| key.to_string_lossy().into_owned());
                warn!(key = %key, "skipping non-UTF-8 environment variable");
                None
            }
        })
        .collect()
}
