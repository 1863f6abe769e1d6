//! End-to-end tests for the task executor with the standard handler registry.
//!
//! Tests that run the built-in Python scripts return early when no
//! `python3` interpreter is on PATH.

use std::path::Path;
use std::sync::Arc;

use delegator_core::{
    ExecutorConfig, HandlerRegistry, PlaceholderHandler, Script, TaskExecutor, TaskHandler,
    METRICS,
};

fn python_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn standard_executor(root: &Path) -> TaskExecutor {
    let config = ExecutorConfig {
        workspace_root: Some(root.to_path_buf()),
        ..ExecutorConfig::default()
    };
    TaskExecutor::new(config, HandlerRegistry::standard())
}

fn leftover_entries(root: &Path) -> usize {
    std::fs::read_dir(root).unwrap().count()
}

// -------------------------------------------------------------------------
// Standard registry (requires python3)
// -------------------------------------------------------------------------

#[tokio::test]
async fn test_nine_factorial_literal() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let root = tempfile::tempdir().unwrap();
    let exec = standard_executor(root.path());

    let result = exec
        .run("Write and run a program that prints 9! as a single integer")
        .await;

    assert!(result.success);
    assert_eq!(result.output, "362880");
    assert_eq!(result.returncode, 0);
    assert!(result.code.contains("math.factorial(9)"));
    assert_eq!(leftover_entries(root.path()), 0);
}

#[tokio::test]
async fn test_factorial_keyword_any_case() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let root = tempfile::tempdir().unwrap();
    let exec = standard_executor(root.path());

    for task in ["compute the factorial of nine", "Compute The FACTORIAL of nine"] {
        let result = exec.run(task).await;
        assert!(result.success, "{task}");
        assert!(result.output.contains("362880"), "{task}");
        assert_eq!(result.returncode, 0);
    }
}

#[tokio::test]
async fn test_placeholder_echoes_task() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let root = tempfile::tempdir().unwrap();
    let exec = standard_executor(root.path());

    let result = exec.run("sort a list of numbers").await;

    assert!(result.success);
    assert_eq!(result.output, "Task received: sort a list of numbers");
    assert_eq!(result.returncode, 0);
    assert!(result.code.starts_with("# Task: sort a list of numbers"));
    assert_eq!(leftover_entries(root.path()), 0);
}

#[tokio::test]
async fn test_placeholder_survives_quotes_and_newlines() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let root = tempfile::tempdir().unwrap();
    let exec = standard_executor(root.path());

    for task in [
        "print(\"x\")\nand a backslash \\ too",
        "nul\0byte",
        "tab\tand\x0bvertical\x0cfeed",
    ] {
        let result = exec.run(task).await;
        assert!(result.success);
        assert_eq!(result.returncode, 0);
        assert_eq!(result.output, format!("Task received: {task}"));
    }
}

// -------------------------------------------------------------------------
// Injected handlers (shell only)
// -------------------------------------------------------------------------

struct SlowHandler;

impl TaskHandler for SlowHandler {
    fn name(&self) -> &str {
        "slow"
    }

    fn matches(&self, task: &str) -> bool {
        task.contains("slow")
    }

    fn synthesize(&self, _task: &str) -> Script {
        Script::shell("exec sleep 30\n")
    }
}

#[tokio::test]
async fn test_injected_delay_times_out() {
    let root = tempfile::tempdir().unwrap();
    let config = ExecutorConfig {
        timeout_ms: 1_000,
        workspace_root: Some(root.path().to_path_buf()),
        ..ExecutorConfig::default()
    };
    let registry = HandlerRegistry::new(Arc::new(PlaceholderHandler))
        .with_handler(Arc::new(SlowHandler));
    let exec = TaskExecutor::new(config, registry);

    let before = METRICS.runs_timed_out();
    let result = exec.run("a slow task").await;

    assert!(!result.success);
    assert_eq!(
        result.output,
        "Error: Agent execution timed out after 1 seconds"
    );
    assert_eq!(result.code, "");
    assert_eq!(result.returncode, -1);
    assert_eq!(leftover_entries(root.path()), 0);
    assert!(METRICS.runs_timed_out() > before);
}

#[tokio::test]
async fn test_missing_interpreter_is_fault() {
    let root = tempfile::tempdir().unwrap();
    let config = ExecutorConfig {
        python_program: "no-such-python-here".to_string(),
        workspace_root: Some(root.path().to_path_buf()),
        ..ExecutorConfig::default()
    };
    let exec = TaskExecutor::new(config, HandlerRegistry::standard());

    let before = METRICS.runs_faulted();
    let result = exec.run("sort a list of numbers").await;

    assert!(!result.success);
    assert!(result.output.starts_with("Error: "));
    assert!(result.output.contains("no-such-python-here"));
    assert_eq!(result.code, "");
    assert_eq!(result.returncode, -1);
    assert_eq!(leftover_entries(root.path()), 0);
    assert!(METRICS.runs_faulted() > before);
}
