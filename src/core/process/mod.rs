// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::which("maya")
//!   .args() .cwd() .env(EnvList)
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command (env cleared, rebuilt from the list,
//!           stdio inherited)
//!       --> ProcessOutput { exit_code, signal, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
