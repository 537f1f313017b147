//! Health check handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness probe - process is running.
///
/// The relay has no dependency worth probing: the remote host is only
/// reachable with a caller's token.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}
