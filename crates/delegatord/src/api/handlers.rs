use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use delegator_core::{emit_task_completed, RunLogEntry};
use tracing::{info, warn};

use super::models::*;
use super::AppState;

// ── Metadata ────────────────────────────────────────────────────────

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::running())
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// ── Tasks ───────────────────────────────────────────────────────────

/// GET /task?q=<text>
///
/// Always 200 once the task reaches the executor; execution faults are
/// reported inside `output`.
pub async fn run_task(
    State(state): State<AppState>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> Result<Json<TaskResponse>, ValidationError> {
    let Query(query) = query.map_err(|e| ValidationError::invalid_query(e.body_text()))?;
    let task = query.q.ok_or_else(|| ValidationError::missing_query("q"))?;

    info!(task = %task, "received task request");
    let result = state.executor.run(&task).await;

    let entry = RunLogEntry::new(&task, AGENT_LABEL, &result);
    emit_task_completed(&entry);
    if let Err(e) = state.run_log.append(&entry).await {
        warn!(error = %e, "failed to append run log entry");
    }

    Ok(Json(TaskResponse {
        task,
        agent: AGENT_LABEL.to_string(),
        output: result.output,
        email: CONTACT_EMAIL.to_string(),
    }))
}
