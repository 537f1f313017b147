//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every error renders as
//! `{ "ok": false, "error": "<message>" }` with the status declared by
//! [`ErrorMetadata`], so nothing reaches the caller as an unhandled fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidrelay_core::{AppError, ErrorMetadata, LogLevel, RemoteError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both the trait and AppError are foreign to this crate).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<RemoteError> for HttpAppError {
    fn from(err: RemoteError) -> Self {
        HttpAppError(AppError::Remote(err))
    }
}

fn log_error(error: &AppError, status: u16) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, status, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, status, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type,
                error_code,
                status,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let code = app_error.http_status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error, code);

        (status, Json(ErrorResponse::new(app_error.client_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = HttpAppError(err).into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_renders_401_envelope() {
        let (status, body) = render(AppError::Unauthorized("Missing Bearer token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "ok": false, "error": "Missing Bearer token" }));
    }

    #[tokio::test]
    async fn remote_error_uses_resolved_status() {
        let (status, body) =
            render(AppError::Remote(RemoteError::api(Some(403), "quotaExceeded"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "quotaExceeded");

        let (status, _) =
            render(AppError::Remote(RemoteError::api(None, "Invalid Credentials"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let (status, body) = render(AppError::Internal("temp dir vanished".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_from_remote_error() {
        let HttpAppError(app_err) = RemoteError::transport("timed out").into();
        match app_err {
            AppError::Remote(RemoteError::Transport(msg)) => assert_eq!(msg, "timed out"),
            _ => panic!("Expected Remote variant"),
        }
    }
}
