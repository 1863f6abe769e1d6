use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use delegator_core::ExecutorConfig;
use tracing::Level;

/// Daemon configuration, from flags or `DELEGATOR_*` environment variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "delegatord")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CLI Coding Agent Delegator", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "DELEGATOR_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "DELEGATOR_PORT", default_value_t = 8000)]
    pub port: u16,

    /// File every log line is mirrored to
    #[arg(long, env = "DELEGATOR_LOG_FILE", default_value = "agent_runs.log")]
    pub log_file: PathBuf,

    /// JSON-lines file completed task records are appended to
    #[arg(long, env = "DELEGATOR_RUN_LOG", default_value = "agent_runs.jsonl")]
    pub run_log: PathBuf,

    /// Emit JSON-formatted log lines on stdout
    #[arg(long, env = "DELEGATOR_LOG_JSON")]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Wall-clock budget for one script run, in milliseconds
    #[arg(long, env = "DELEGATOR_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Interpreter for Python scripts
    #[arg(long = "python", env = "DELEGATOR_PYTHON", default_value = "python3")]
    pub python_program: String,

    /// Interpreter for shell scripts
    #[arg(long = "shell", env = "DELEGATOR_SHELL", default_value = "sh")]
    pub shell_program: String,

    /// Directory workspaces are created in (default: system temp dir)
    #[arg(long, env = "DELEGATOR_WORKSPACE_ROOT")]
    pub workspace_root: Option<PathBuf>,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            timeout_ms: self.timeout_ms,
            python_program: self.python_program.clone(),
            shell_program: self.shell_program.clone(),
            workspace_root: self.workspace_root.clone(),
        }
    }
}
