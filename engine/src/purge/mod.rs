//! Best-effort removal of an add-on's persisted data directory
//!
//! Deletion runs an external recursive-delete command against the folder.
//! Failures never reach the caller: a command that cannot be started, or that
//! exits with a nonzero status, is reported to the [`EventSink`] and the purge
//! returns normally. Uninstall workflows call this during cleanup and must not
//! fail because residual files could not be removed.
//!
//! # Execution
//! - execve-style execution (no shell), folder passed after `--` as the final argument
//! - stdin set to null, stdout discarded, stderr captured for the report

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use thiserror::Error;
use tokio::process::Command;

use crate::config::PurgeConfig;
use crate::telemetry::{EventSink, PolicyEvent};

/// Program used when no purge command is configured
pub const DEFAULT_PURGE_PROGRAM: &str = "rm";

/// Flags passed ahead of the folder
pub const DEFAULT_PURGE_ARGS: &[&str] = &["-r"];

#[derive(Debug, Error)]
enum PurgeFailure {
    #[error("{0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0}")]
    Exit(String),
}

/// Runs the configured delete command and reports failures
pub struct DataPurger {
    program: String,
    args: Vec<String>,
    sink: Arc<dyn EventSink>,
}

impl DataPurger {
    /// Creates a purger using `rm -r`
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_command(
            DEFAULT_PURGE_PROGRAM,
            DEFAULT_PURGE_ARGS.iter().map(|arg| arg.to_string()).collect(),
            sink,
        )
    }

    /// Creates a purger with a custom delete command.
    pub fn with_command(
        program: impl Into<String>,
        args: Vec<String>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            sink,
        }
    }

    pub fn from_config(config: &PurgeConfig, sink: Arc<dyn EventSink>) -> Self {
        Self::with_command(config.program.clone(), config.args.clone(), sink)
    }

    /// Removes `folder`, reporting any failure to the sink.
    pub async fn purge(&self, folder: &Path) {
        purge_with(&self.program, &self.args, folder, self.sink.as_ref()).await;
    }
}

/// Removes `folder` with the default delete command.
///
/// Returns normally whether or not the folder was removed; failures are
/// reported to `sink` as a single [`PolicyEvent::PurgeFailed`].
pub async fn purge_data(folder: &Path, sink: &dyn EventSink) {
    let args: Vec<String> = DEFAULT_PURGE_ARGS.iter().map(|arg| arg.to_string()).collect();
    purge_with(DEFAULT_PURGE_PROGRAM, &args, folder, sink).await;
}

async fn purge_with(program: &str, args: &[String], folder: &Path, sink: &dyn EventSink) {
    match run_delete(program, args, folder).await {
        Ok(()) => tracing::debug!(folder = %folder.display(), "Removed add-on data"),
        Err(failure) => sink.record_error(&PolicyEvent::PurgeFailed {
            folder: folder.to_path_buf(),
            error: failure.to_string(),
        }),
    }
}

fn delete_command(program: &str, args: &[String], folder: &Path) -> Command {
    let mut command = Command::new(program);
    command
        .args(args)
        .arg("--")
        .arg(folder)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    command
}

async fn run_delete(program: &str, args: &[String], folder: &Path) -> Result<(), PurgeFailure> {
    let output = delete_command(program, args, folder).output().await?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        Err(PurgeFailure::Exit(format!(
            "{} exited with {}",
            program, output.status
        )))
    } else {
        Err(PurgeFailure::Exit(stderr))
    }
}
