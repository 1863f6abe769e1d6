use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use delegator_core::{init_tracing, HandlerRegistry, JsonlRunLog, TaskExecutor, METRICS, VERSION};
use tokio::net::TcpListener;
use tracing::info;

use delegatord::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_tracing(config.json, config.log_level(), Some(&config.log_file))
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let run_log = JsonlRunLog::open(&config.run_log)
        .await
        .with_context(|| format!("failed to open run log {}", config.run_log.display()))?;

    let executor = TaskExecutor::new(config.executor_config(), HandlerRegistry::standard());
    info!(
        handlers = ?executor.registry().handler_names(),
        timeout_ms = config.timeout_ms,
        "task handlers registered"
    );

    let app = router(AppState::new(executor, Arc::new(run_log)));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, version = VERSION, "delegatord ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    METRICS.flush();
    info!("delegatord stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
