// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The default command: compose the environment, then launch.
//!
//! ```text
//! config.sources() + args.sources()
//!        |
//!        v
//! Resolver::compose(current_env())
//!        |
//!        +--> --log / --dry: print added entries
//!        |
//!        v
//! ProcessBuilder::which(COMMAND)
//!   .env(composed) .cwd(--dir)
//!        |
//!        v
//! run_with_cancellation(token) --> RunStatus
//!
//! Ctrl-C:  1st  the terminal already told the child; wait for it
//!          2nd or INTERRUPT_GRACE later  cancel the token (kill)
//! ```

use anyhow::Context;
use std::io::Write as _;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::run::RunArgs;
use crate::config::Config;
use crate::config::types::PrintFormat;
use crate::core::env::compose::ComposedEnv;
use crate::core::env::current_env;
use crate::core::env::list::EnvList;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{EnvrunResult, ProcessError, Result};

/// How long a child may keep running after Ctrl-C before it is killed.
pub const INTERRUPT_GRACE: Duration = Duration::from_secs(5);

/// Unix `SIGINT`.
const SIGINT: i32 = 2;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing was launched (`--dry`).
    Printed,
    /// The child exited; -1 when it reported no code.
    Exited(i32),
    /// The child died from Ctrl-C, or was killed after it.
    Interrupted,
}

impl RunStatus {
    /// Exit code for this process.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Printed => 0,
            Self::Exited(code) => u8::try_from(code).unwrap_or(1),
            Self::Interrupted => 130,
        }
    }
}

/// Resolves the sources of `config` and `args` on top of `base`.
///
/// Configured sources come first, kind by kind.
///
/// # Errors
///
/// Returns an error for invalid separator settings or the first failing source.
pub fn resolve_environment(
    args: &RunArgs,
    config: &Config,
    base: EnvList,
) -> EnvrunResult<ComposedEnv> {
    let resolver = config.resolver()?;
    let sources = config.sources().chain(args.sources());
    debug!(
        assignments = sources.assignments.len(),
        envsets = sources.envsets.len(),
        envfiles = sources.envfiles.len(),
        separators = ?resolver.separators(),
        "resolving environment"
    );
    Ok(resolver.compose(base, &sources)?)
}

/// Renders resolved entries in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_entries(entries: &[String], format: PrintFormat) -> Result<String> {
    match format {
        PrintFormat::Plain => Ok(entries.iter().map(|e| format!("{e}\n")).collect()),
        PrintFormat::Json => {
            let mut json = serde_json::to_string_pretty(entries)
                .context("failed to serialize environment entries")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Watches for Ctrl-C while the child runs.
///
/// The child shares our terminal, so it receives the interrupt itself and
/// may handle it. It is killed only on a second Ctrl-C or when it is still
/// running once `grace` has passed.
async fn watch_interrupts(token: CancellationToken, grace: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    warn!(grace = ?grace, "interrupted, waiting for child to exit");
    tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => warn!("interrupted again, stopping child"),
        () = tokio::time::sleep(grace) => warn!("child still running, stopping it"),
    }
    token.cancel();
}

/// Maps a finished child to the status envrun reports.
fn run_status(output: &ProcessOutput) -> RunStatus {
    if output.is_interrupted() || output.signal() == Some(SIGINT) {
        RunStatus::Interrupted
    } else {
        RunStatus::Exited(output.exit_code())
    }
}

/// Runs the default command.
///
/// # Errors
///
/// Returns an error if the environment cannot be resolved, no command was
/// given outside `--dry`, or the command cannot be started.
pub async fn run_command(args: &RunArgs, config: &Config) -> Result<RunStatus> {
    let composed = resolve_environment(args, config, current_env())?;

    if args.log || args.dry {
        let rendered = render_entries(composed.added(), config.global.print_format)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
    }

    if args.dry {
        return Ok(RunStatus::Printed);
    }

    let (program, program_args) = args.program().ok_or(ProcessError::MissingCommand)?;

    let mut builder = ProcessBuilder::which(program)?
        .args(program_args)
        .name(program)
        .env(composed.into_env())
        .flag(ProcessFlags::ALLOW_FAILURE);
    if let Some(dir) = &args.dir {
        builder = builder.cwd(dir);
    }

    let token = CancellationToken::new();
    let signal_task = tokio::spawn(watch_interrupts(token.clone(), INTERRUPT_GRACE));

    let output = builder.run_with_cancellation(token).await;
    signal_task.abort();
    let output = output?;

    let status = run_status(&output);
    info!(
        code = output.exit_code(),
        signal = ?output.signal(),
        status = ?status,
        "{program} exited"
    );
    Ok(status)
}
