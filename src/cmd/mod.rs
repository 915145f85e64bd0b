// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   run (compose + launch), config (--show-config)
//! ```

pub mod config;
pub mod run;

#[cfg(test)]
mod tests;
