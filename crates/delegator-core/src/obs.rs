//! Structured observability hooks for agent run lifecycle events.
//!
//! This module provides:
//! - A run-scoped tracing span via [`run_span`], attached to the executor
//!   future with `tracing::Instrument`
//! - Emission functions for key lifecycle events: start, stderr, timeout,
//!   fault, finish, and task completion
//!
//! Events are emitted at `info!` level unless noted (configurable via
//! `RUST_LOG`). For JSON output, start the daemon with `--json`.

use tracing::{error, info, warn};

use crate::run_log::RunLogEntry;

/// Span tagging every event of one executor call with its run id.
///
/// ```ignore
/// executor_future.instrument(run_span("0b7e...")).await;
/// // all events inside carry run_id = "0b7e..."
/// ```
pub fn run_span(run_id: &str) -> tracing::Span {
    tracing::info_span!("agent.run", run_id = %run_id)
}

/// Emit event: run started for a task, with the handler that claimed it.
pub fn emit_run_started(task: &str, handler: &str) {
    info!(event = "run.started", task = %task, handler = %handler);
}

/// Emit event: workspace created.
pub fn emit_workspace_created(path: &std::path::Path) {
    info!(event = "run.workspace_created", workspace = %path.display());
}

/// Emit event: the script wrote to stderr (warning level).
pub fn emit_stderr(stderr: &str) {
    warn!(event = "run.stderr", stderr = %stderr);
}

/// Emit event: the script exceeded its wall-clock budget (error level).
pub fn emit_run_timed_out(limit_ms: u64) {
    error!(event = "run.timed_out", limit_ms = limit_ms);
}

/// Emit event: execution fault other than a timeout (error level).
pub fn emit_run_faulted(error: &dyn std::fmt::Display) {
    error!(event = "run.faulted", error = %error);
}

/// Emit event: run finished with duration, return code and success status.
pub fn emit_run_finished(duration_ms: u64, returncode: i32, success: bool, output: &str) {
    info!(
        event = "run.finished",
        duration_ms = duration_ms,
        returncode = returncode,
        success = success,
        output = %output,
    );
}

/// Emit event: a task request completed; carries the full log entry as JSON.
pub fn emit_task_completed(entry: &RunLogEntry) {
    match serde_json::to_string(entry) {
        Ok(json) => info!(event = "task.completed", "Task completed: {json}"),
        Err(err) => warn!(
            event = "task.completed",
            task = %entry.task,
            error = %err,
            "Task completed but the log entry could not be serialized"
        ),
    }
}
