// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment sources and the command to launch.

use clap::Args;
use std::path::PathBuf;

use crate::core::env::compose::EnvSources;

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Inline assignments such as `A=1,B=$A/bin`. Can be specified multiple times.
    #[arg(short = 'e', long = "env", value_name = "ASSIGNMENTS", action = clap::ArgAction::Append)]
    pub env: Vec<String>,

    /// Env files, comma separated. A leading or trailing `?` marks a file optional.
    #[arg(short = 'f', long = "envfile", value_name = "FILES", action = clap::ArgAction::Append)]
    pub envfile: Vec<String>,

    /// Env-set files listing env files, comma separated.
    #[arg(short = 's', long = "envset", value_name = "FILES", action = clap::ArgAction::Append)]
    pub envset: Vec<String>,

    /// Working directory of the launched command.
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Prints every resolved entry added on top of the inherited environment.
    #[arg(long)]
    pub log: bool,

    /// Resolves and prints the environment without launching anything.
    #[arg(long)]
    pub dry: bool,

    /// Prints the loaded configuration files and options, then exits.
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Command to run, followed by its arguments.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Sources given on the command line, in flag order per kind.
    #[must_use]
    pub fn sources(&self) -> EnvSources {
        let mut sources = EnvSources::new();
        for list in &self.env {
            sources = sources.with_assignments(list);
        }
        for list in &self.envset {
            sources = sources.with_envsets(list);
        }
        for list in &self.envfile {
            sources = sources.with_envfiles(list);
        }
        sources
    }

    /// Splits the trailing arguments into program and arguments.
    #[must_use]
    pub fn program(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }
}
