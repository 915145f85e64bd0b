// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> --show-config | run
//!                                           |
//!                                           v
//!                              ExitCode (child's code, 130 on Ctrl-C)
//! ```

use std::process::ExitCode;

use envrun::cli::{self, Cli};
use envrun::cmd::config::run_show_config_command;
use envrun::cmd::run::run_command;
use envrun::config::loader::ConfigLoader;
use envrun::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use envrun::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = match build_config_loader(&cli) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let loaded_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(files = ?loaded_files, "configuration loaded");

    if cli.run.show_config {
        run_show_config_command(&loaded_files, &config);
        return ExitCode::SUCCESS;
    }

    match run_command(&cli.run, &config).await {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config_loader(cli: &Cli) -> envrun::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    cli.global
        .apply_overrides(loader.with_env_prefix(ENV_PREFIX))
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}
