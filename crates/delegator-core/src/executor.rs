//! Task executor: classify, synthesize, run, report.
//!
//! [`TaskExecutor::run`] resolves a handler for the task, writes the script
//! it synthesizes into a fresh [`Workspace`], runs it under the configured
//! interpreter with a wall-clock budget, and folds the outcome into an
//! [`ExecutionResult`]. Faults never escape: a timeout or any other error
//! becomes a failed result with `returncode == -1`.

use std::path::PathBuf;
use std::process::{ExitStatus, Output, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::Instrument;

use crate::error::ExecutionError;
use crate::handlers::HandlerRegistry;
use crate::metrics::METRICS;
use crate::obs;
use crate::script::{Script, ScriptLanguage};
use crate::workspace::Workspace;

/// Return code reported when no process outcome exists.
pub const FAILED_RETURNCODE: i32 = -1;

/// Configuration for script execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutorConfig {
    /// Maximum wall-clock time for one script run (milliseconds).
    pub timeout_ms: u64,
    /// Interpreter for Python scripts.
    pub python_program: String,
    /// Interpreter for shell scripts.
    pub shell_program: String,
    /// Directory workspaces are created in (system temp dir when `None`).
    pub workspace_root: Option<PathBuf>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            python_program: "python3".to_string(),
            shell_program: "sh".to_string(),
            workspace_root: None,
        }
    }
}

impl ExecutorConfig {
    /// Interpreter that runs scripts written in `language`.
    pub fn interpreter(&self, language: ScriptLanguage) -> &str {
        match language {
            ScriptLanguage::Python => &self.python_program,
            ScriptLanguage::Shell => &self.shell_program,
        }
    }
}

/// Outcome of one executor call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// `false` only when execution faulted (timeout or error).
    pub success: bool,
    /// Trimmed stdout, followed by `[stderr: ...]` when stderr was written.
    pub output: String,
    /// The synthesized source; empty on failure.
    pub code: String,
    /// Process exit code, or `-1` on failure.
    pub returncode: i32,
}

impl ExecutionResult {
    /// Failed result describing `err`.
    pub fn failed(err: &ExecutionError) -> Self {
        Self {
            success: false,
            output: format!("Error: {err}"),
            code: String::new(),
            returncode: FAILED_RETURNCODE,
        }
    }

    fn completed(script: &Script, output: &Output) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut text = stdout.trim_end().to_string();
        if !stderr.is_empty() {
            obs::emit_stderr(&stderr);
            text.push_str(&format!("\n[stderr: {}]", stderr.trim()));
        }

        Self {
            success: true,
            output: text,
            code: script.trimmed_source().to_string(),
            returncode: exit_code(output.status),
        }
    }
}

/// Runs tasks through a handler registry.
#[derive(Debug, Clone, Default)]
pub struct TaskExecutor {
    config: ExecutorConfig,
    registry: HandlerRegistry,
}

impl TaskExecutor {
    pub fn new(config: ExecutorConfig, registry: HandlerRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Execute `task` and report the outcome. Never fails.
    pub async fn run(&self, task: &str) -> ExecutionResult {
        let run_id = uuid::Uuid::new_v4().to_string();
        self.run_traced(task).instrument(obs::run_span(&run_id)).await
    }

    async fn run_traced(&self, task: &str) -> ExecutionResult {
        METRICS.inc_runs_started();
        let start = Instant::now();

        let handler = self.registry.resolve(task);
        obs::emit_run_started(task, handler.name());
        let script = handler.synthesize(task);

        let result = match self.execute(&script).await {
            Ok(result) => result,
            Err(err) => {
                if err.is_timeout() {
                    METRICS.inc_timeouts();
                    obs::emit_run_timed_out(self.config.timeout_ms);
                } else {
                    METRICS.inc_faults();
                    obs::emit_run_faulted(&err);
                }
                ExecutionResult::failed(&err)
            }
        };

        obs::emit_run_finished(
            start.elapsed().as_millis() as u64,
            result.returncode,
            result.success,
            &result.output,
        );
        result
    }

    /// Run `script` in a fresh workspace; the workspace is gone on return.
    async fn execute(&self, script: &Script) -> Result<ExecutionResult, ExecutionError> {
        let workspace = Workspace::provision(self.config.workspace_root.clone())
            .await
            .map_err(ExecutionError::Workspace)?;
        obs::emit_workspace_created(workspace.path());

        let outcome = self.run_script(&workspace, script).await;
        let closed = workspace.dispose().await;

        let output = outcome?;
        closed.map_err(ExecutionError::Cleanup)?;
        Ok(ExecutionResult::completed(script, &output))
    }

    async fn run_script(
        &self,
        workspace: &Workspace,
        script: &Script,
    ) -> Result<Output, ExecutionError> {
        let path = workspace
            .write_script(script)
            .await
            .map_err(ExecutionError::ScriptWrite)?;

        let program = self.config.interpreter(script.language);
        let child = Command::new(program)
            .arg(&path)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        tokio::time::timeout(
            Duration::from_millis(self.config.timeout_ms),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExecutionError::Timeout {
            limit_ms: self.config.timeout_ms,
        })?
        .map_err(ExecutionError::Wait)
    }
}

/// Exit code, or the negated signal number for signal-terminated children.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    FAILED_RETURNCODE
}
