use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent label reported with every task response.
pub const AGENT_LABEL: &str = "copilot-cli";

/// Contact identifier reported with every task response.
pub const CONTACT_EMAIL: &str = "23f2000764@ds.study.iitm.ac.in";

pub const SERVICE_NAME: &str = "CLI Coding Agent Delegator";

// ---------------------------------------------------------------------------
// Validation error response
// ---------------------------------------------------------------------------

/// One failed field: `{"loc": [...], "msg": "...", "type": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request validation failure, answered with 422 and a `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub detail: Vec<FieldError>,
}

impl ValidationError {
    /// A required query parameter was absent.
    pub fn missing_query(name: &str) -> Self {
        Self {
            detail: vec![FieldError {
                loc: vec!["query".to_string(), name.to_string()],
                msg: "Field required".to_string(),
                kind: "missing".to_string(),
            }],
        }
    }

    /// The query string could not be parsed at all.
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self {
            detail: vec![FieldError {
                loc: vec!["query".to_string()],
                msg: reason.into(),
                kind: "invalid".to_string(),
            }],
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

// ---------------------------------------------------------------------------
// GET /task
// ---------------------------------------------------------------------------

/// Query string of `GET /task`. `q` is required; absence is a 422.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: String,
    pub agent: String,
    pub output: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// GET / and GET /health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(rename = "/task")]
    pub task: String,
    #[serde(rename = "/health")]
    pub health: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub service: String,
    pub endpoints: Endpoints,
}

impl RootResponse {
    pub fn running() -> Self {
        Self {
            status: "running".to_string(),
            service: SERVICE_NAME.to_string(),
            endpoints: Endpoints {
                task: "Execute coding tasks via CLI agent".to_string(),
                health: "Check service health".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_shape() {
        let value = serde_json::to_value(ValidationError::missing_query("q")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "detail": [{"loc": ["query", "q"], "msg": "Field required", "type": "missing"}]
            })
        );
    }

    #[test]
    fn test_validation_error_status() {
        let response = ValidationError::missing_query("q").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_root_endpoint_keys() {
        let value = serde_json::to_value(RootResponse::running()).unwrap();
        assert_eq!(value["status"], "running");
        assert_eq!(value["service"], SERVICE_NAME);
        assert!(value["endpoints"]["/task"].is_string());
        assert!(value["endpoints"]["/health"].is_string());
    }

    #[test]
    fn test_task_response_field_order() {
        let response = TaskResponse {
            task: "t".into(),
            agent: AGENT_LABEL.into(),
            output: "o".into(),
            email: CONTACT_EMAIL.into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"task":"t","agent":"copilot-cli","output":"o","email":"23f2000764@ds.study.iitm.ac.in"}"#
        );
    }
}
