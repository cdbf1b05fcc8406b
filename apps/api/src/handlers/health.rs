//! Liveness probe.

use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// `GET /health`. Answers without touching the database.
pub async fn health() -> ApiResponse<HealthStatus> {
    ApiResponse::ok(HealthStatus { status: "ok" })
}
