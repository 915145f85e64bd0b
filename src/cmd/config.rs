// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `--show-config` output.

use crate::config::Config;

/// Display loaded configuration files followed by the effective options.
pub fn run_show_config_command(config_files: &[String], config: &Config) {
    println!("files:");
    if config_files.is_empty() {
        println!("  (none)");
    } else {
        for line in config_files {
            println!("  {line}");
        }
    }

    println!("options:");
    for line in config.format_options() {
        println!("  {line}");
    }
}
