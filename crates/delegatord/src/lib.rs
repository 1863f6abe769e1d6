//! Delegator daemon: HTTP front-end over the delegator core executor.
//!
//! ## Endpoints
//!
//! - `GET /task?q=<text>`: run a task and report the agent output
//! - `GET /`: service metadata
//! - `GET /health`: liveness with a timestamp

pub mod api;
pub mod config;

pub use api::{router, AppState};
pub use config::Config;
