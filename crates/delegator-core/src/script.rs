//! Synthesized scripts and the languages they are written in.

use serde::{Deserialize, Serialize};

/// Language a synthesized script is written in.
///
/// The language decides the file name inside the workspace and which
/// configured interpreter runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLanguage {
    Python,
    Shell,
}

impl ScriptLanguage {
    /// File name the script is written to inside the workspace.
    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptLanguage::Python => "solution.py",
            ScriptLanguage::Shell => "solution.sh",
        }
    }
}

impl std::fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptLanguage::Python => write!(f, "python"),
            ScriptLanguage::Shell => write!(f, "shell"),
        }
    }
}

/// A generated solution: source text plus the language it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub language: ScriptLanguage,
    pub source: String,
}

impl Script {
    pub fn python(source: impl Into<String>) -> Self {
        Self {
            language: ScriptLanguage::Python,
            source: source.into(),
        }
    }

    pub fn shell(source: impl Into<String>) -> Self {
        Self {
            language: ScriptLanguage::Shell,
            source: source.into(),
        }
    }

    /// Source with surrounding whitespace removed, as reported to callers.
    pub fn trimmed_source(&self) -> &str {
        self.source.trim()
    }
}

/// Render `text` as a double-quoted Python string literal.
///
/// JSON string escaping is a subset of Python's literal syntax, so the
/// serde_json encoder gives a literal that round-trips any input.
pub fn python_string_literal(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Blank out control characters so `text` stays inside a single `#`
/// comment line. Line breaks end the comment and Python rejects NUL bytes
/// anywhere in source.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
