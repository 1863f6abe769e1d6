//! Error types for task execution and the run log.

/// Faults raised while preparing or running a synthesized script.
///
/// The executor never propagates these to its caller; they are folded into a
/// failed [`ExecutionResult`](crate::executor::ExecutionResult).
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Agent execution timed out after {} seconds", format_secs(.limit_ms))]
    Timeout { limit_ms: u64 },

    #[error("failed to create workspace: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("failed to write script: {0}")]
    ScriptWrite(#[source] std::io::Error),

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect process output: {0}")]
    Wait(#[source] std::io::Error),

    #[error("failed to remove workspace: {0}")]
    Cleanup(#[source] std::io::Error),
}

impl ExecutionError {
    /// Returns `true` for the timeout fault.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExecutionError::Timeout { .. })
    }
}

/// Errors produced by run log sinks.
#[derive(Debug, thiserror::Error)]
pub enum RunLogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_secs(ms: &u64) -> String {
    // 30_000 -> "30", 1_500 -> "1.5"
    format!("{}", *ms as f64 / 1000.0)
}
