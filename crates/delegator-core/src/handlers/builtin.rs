//! Built-in handlers.

use crate::script::{python_string_literal, single_line, Script};

use super::TaskHandler;

/// Recognises requests for 9! and answers with `math.factorial(9)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorialHandler;

const FACTORIAL_SOURCE: &str = "import math
result = math.factorial(9)
print(result)
";

impl TaskHandler for FactorialHandler {
    fn name(&self) -> &str {
        "factorial"
    }

    fn matches(&self, task: &str) -> bool {
        task.to_lowercase().contains("factorial") || task.contains("9!")
    }

    fn synthesize(&self, _task: &str) -> Script {
        Script::python(FACTORIAL_SOURCE)
    }
}

/// Fallback that only echoes the task back.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderHandler;

impl TaskHandler for PlaceholderHandler {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn matches(&self, _task: &str) -> bool {
        true
    }

    fn synthesize(&self, task: &str) -> Script {
        let message = python_string_literal(&format!("Task received: {task}"));
        Script::python(format!(
            "# Task: {}\n# Auto-generated solution placeholder\nprint({})\n",
            single_line(task),
            message
        ))
    }
}
