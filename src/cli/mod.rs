// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envrun using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envrun [global options] [source options] [--] <COMMAND> [ARGS]...
//!
//! global:  --config --log-level --file-log-level --log-file --print-format
//! sources: --env --envfile --envset
//! run:     --dir --log --dry --show-config
//! ```

pub mod global;
pub mod run;


use crate::cli::global::GlobalOptions;
use crate::cli::run::RunArgs;
use clap::Parser;

/// Environment Templating Launcher
///
/// Runs a program with an environment built from inline assignments, env files
/// and env-set files.
#[derive(Debug, Parser)]
#[command(
    name = "envrun",
    author,
    version,
    about = "Environment Templating Launcher",
    long_about = "envrun Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs a program with an environment templated from env files.\n\n\
                  Values may reference variables with $NAME. Unquoted '/' and ':'\n\
                  become the host path and list separators; text between backticks\n\
                  is kept as is.",
    after_help = "ENV FILES:\n\n\
                  An env file holds one KEY=VALUE per line; blank lines and lines\n\
                  starting with '#' are ignored. Each line may reference the lines\n\
                  before it. An env-set file lists one env file per line. A '?' at\n\
                  the start or end of a file name makes a missing file acceptable.\n\n\
                  Sources apply in order: --env, then --envset, then --envfile."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Sources and command
    #[command(flatten)]
    pub run: RunArgs,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
