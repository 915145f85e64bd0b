// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layering of assignment sources on top of a base environment.
//!
//! ```text
//! base (inherited)
//!   + --env       A=1, B=$A          one entry each
//!   + --envset    site.envs          each listed file, in order
//!   + --envfile   show.env, ?x.env   each file, in order
//!   = ComposedEnv { env, added }
//! ```

use tracing::debug;

use super::file::EnvFileSpec;
use super::list::EnvList;
use super::resolver::Resolver;
use crate::error::EnvResult;

/// Splits a comma-separated option value into trimmed, non-empty items.
pub fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Assignment sources in the order they are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSources {
    /// Inline `KEY=VALUE` assignments.
    pub assignments: Vec<String>,
    /// Env-set files listing env files.
    pub envsets: Vec<EnvFileSpec>,
    /// Env files.
    pub envfiles: Vec<EnvFileSpec>,
}

impl EnvSources {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the items of a comma-separated assignment list.
    #[must_use]
    pub fn with_assignments(mut self, list: &str) -> Self {
        self.assignments.extend(split_list(list).map(str::to_owned));
        self
    }

    /// Adds the items of a comma-separated env-set file list.
    #[must_use]
    pub fn with_envsets(mut self, list: &str) -> Self {
        self.envsets.extend(split_list(list).map(EnvFileSpec::parse));
        self
    }

    /// Adds the items of a comma-separated env file list.
    #[must_use]
    pub fn with_envfiles(mut self, list: &str) -> Self {
        self.envfiles.extend(split_list(list).map(EnvFileSpec::parse));
        self
    }

    /// Appends `other` after these sources, kind by kind.
    #[must_use]
    pub fn chain(mut self, other: Self) -> Self {
        self.assignments.extend(other.assignments);
        self.envsets.extend(other.envsets);
        self.envfiles.extend(other.envfiles);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.envsets.is_empty() && self.envfiles.is_empty()
    }
}

/// The final environment together with what was added to the base.
#[derive(Debug, Clone, Default)]
pub struct ComposedEnv {
    env: EnvList,
    added: Vec<String>,
}

impl ComposedEnv {
    fn push(&mut self, entry: String) {
        self.env.push(entry.clone());
        self.added.push(entry);
    }

    fn extend(&mut self, entries: Vec<String>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// The full environment: base entries followed by added ones.
    #[must_use]
    pub const fn env(&self) -> &EnvList {
        &self.env
    }

    /// Entries added on top of the base, in the order they were resolved.
    #[must_use]
    pub fn added(&self) -> &[String] {
        &self.added
    }

    #[must_use]
    pub fn into_env(self) -> EnvList {
        self.env
    }
}

impl Resolver {
    /// Applies `sources` on top of `base`.
    ///
    /// Every source resolves against everything applied before it:
    /// inline assignments first, then the files of each env-set file, then
    /// the env files.
    ///
    /// # Errors
    ///
    /// Returns the first assignment, env-set or env file error.
    pub fn compose(&self, base: EnvList, sources: &EnvSources) -> EnvResult<ComposedEnv> {
        let mut composed = ComposedEnv {
            env: base,
            added: Vec::new(),
        };

        for assignment in sources
            .assignments
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|a| !a.is_empty())
        {
            let entry = self.parse_assignment(assignment, &composed.env)?;
            composed.push(entry);
        }

        for set in &sources.envsets {
            for spec in self.load_envset_file(set, &composed.env)? {
                let entries = self.load_env_spec(&spec, &composed.env)?;
                composed.extend(entries);
            }
        }

        for spec in &sources.envfiles {
            let entries = self.load_env_spec(spec, &composed.env)?;
            composed.extend(entries);
        }

        debug!(
            base = composed.env.len() - composed.added.len(),
            added = composed.added.len(),
            "environment composed"
        );
        Ok(composed)
    }
}
