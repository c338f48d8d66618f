//! Health check handler.

use crate::models::HealthResponse;
use axum::Json;

/// Handler for GET /v1/health
///
/// Liveness probe; no dependencies to check, so always healthy while serving.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
    }
}
