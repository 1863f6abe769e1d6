//! Delegator Core Library
//!
//! Classifies task descriptions through a handler registry, runs the
//! synthesized script in a scoped workspace, and records the outcome.

pub mod error;
pub mod executor;
pub mod handlers;
pub mod metrics;
pub mod obs;
pub mod run_log;
pub mod script;
pub mod telemetry;
pub mod workspace;

pub use error::{ExecutionError, RunLogError};
pub use executor::{ExecutionResult, ExecutorConfig, TaskExecutor, FAILED_RETURNCODE};
pub use handlers::{FactorialHandler, HandlerRegistry, PlaceholderHandler, TaskHandler};
pub use metrics::METRICS;
pub use obs::{
    emit_run_faulted, emit_run_finished, emit_run_started, emit_run_timed_out, emit_stderr,
    emit_task_completed, emit_workspace_created, run_span,
};
pub use run_log::{JsonlRunLog, MemoryRunLog, RunLog, RunLogEntry, RunLogResult};
pub use script::{Script, ScriptLanguage};
pub use telemetry::init_tracing;
pub use workspace::Workspace;

/// Delegator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
