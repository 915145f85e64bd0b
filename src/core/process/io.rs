// envrun: Environment Templating Launcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Waiting for processes.
//!
//! ```text
//! run_child(token)
//!   wait ----------------------> exit code / signal
//!   token.cancelled() --> kill --> interrupted
//!   --> ProcessOutput { exit_code, signal, interrupted }
//! ```

use crate::error::Result;
use anyhow::Context;
use std::process::ExitStatus;
use tokio::process::Child;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::builder::{ProcessBuilder, ProcessOutput};

/// Signal that terminated the process, if it did not exit on its own.
#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt as _;
    status.signal()
}

#[cfg(not(unix))]
const fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

impl ProcessBuilder {
    /// Waits for the spawned child, killing it if `token` is cancelled first.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
        token: CancellationToken,
    ) -> Result<ProcessOutput> {
        let (exit_status, interrupted) = tokio::select! {
            status = child.wait() => (status?, false),
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                child.kill().await.ok();
                let status = child.wait().await
                    .with_context(|| format!("failed waiting for process {name} to exit"))?;
                (status, true)
            }
        };

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            terminating_signal(exit_status),
            interrupted,
        ))
    }
}
