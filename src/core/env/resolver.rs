// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolution engine settings.
//!
//! ```text
//! Resolver::builder()
//!   .with_separators(Separators::host())
//!   .with_max_expansions(1024)
//!   .build()
//!
//! impl blocks:
//!   expand.rs   expand() / convert()
//!   assign.rs   parse_assignment()
//!   file.rs     load_env_file() / load_envset_file()
//!   compose.rs  compose()
//! ```

use bon::Builder;

use super::separators::Separators;

/// Default cap on substitutions performed while expanding one value.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1024;

/// Resolves assignments against an [`EnvList`](super::list::EnvList).
///
/// The resolver holds no environment of its own; every operation takes the
/// list to resolve against, so one resolver can serve a whole invocation.
#[derive(Debug, Clone, Builder)]
pub struct Resolver {
    #[builder(setters(name = with_separators), default = Separators::host())]
    separators: Separators,
    /// `0` disables the cap.
    #[builder(setters(name = with_max_expansions), default = DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Resolver {
    #[must_use]
    pub const fn separators(&self) -> Separators {
        self.separators
    }

    #[must_use]
    pub const fn max_expansions(&self) -> usize {
        self.max_expansions
    }

    /// Returns the cap, or `None` when expansion is unbounded.
    pub(super) const fn expansion_limit(&self) -> Option<usize> {
        if self.max_expansions == 0 {
            None
        } else {
            Some(self.max_expansions)
        }
    }
}
