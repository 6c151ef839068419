/// Health check API routes
use axum::http::StatusCode;

/// GET /api/v1/playlist/health - liveness probe, empty 200
pub async fn health() -> StatusCode {
    StatusCode::OK
}
