//! Health check

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health of the service
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `up` when the service can answer
    status: &'static str,

    /// Current server time, in seconds since the Unix epoch
    time: i64,
}

/// Answer with the current time to show the service is up
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "up",
        time: Utc::now().timestamp(),
    })
}
