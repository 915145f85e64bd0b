// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for environment templating and process launch.
//!
//! ```text
//!              core
//!               |
//!        +------+------+
//!        |             |
//!        v             v
//!       env         process
//!        |             |
//!   EnvList         Builder
//!   Resolver        Output
//!   EnvFileSpec     cancellation
//! ```

pub mod env;
pub mod process;
