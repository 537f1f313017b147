//! Error types module
//!
//! All request-level failures are unified under [`AppError`]. Failures reported
//! by the remote video host are carried as [`RemoteError`], whose HTTP status is
//! derived from what the remote side reported (see [`resolve_remote_status`]).

use regex::Regex;
use std::io;
use std::sync::LazyLock;

/// Message used when a remote failure carries no usable text.
pub const DEFAULT_REMOTE_MESSAGE: &str = "Upload failed";

static UNAUTHORIZED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)invalid credentials|unauthorized").expect("static regex is valid")
});

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures caused by a collaborator
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "REMOTE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// A failure reported by (or while talking to) the remote video host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The remote API answered with an error. `status` is the HTTP status or
    /// the API's own error code, whichever the response carried.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The request never produced a response (connect failure, timeout, broken body stream).
    #[error("{0}")]
    Transport(String),
}

impl RemoteError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        RemoteError::Api {
            status,
            message: non_empty_message(message.into()),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        RemoteError::Transport(non_empty_message(message.into()))
    }

    /// Status reported by the remote side, if any. Zero counts as absent.
    pub fn reported_status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => status.filter(|s| *s != 0),
            RemoteError::Transport(_) => None,
        }
    }

    /// HTTP status this failure maps to at the API boundary.
    pub fn http_status(&self) -> u16 {
        resolve_remote_status(self.reported_status(), &self.to_string())
    }
}

fn non_empty_message(message: String) -> String {
    if message.trim().is_empty() {
        DEFAULT_REMOTE_MESSAGE.to_string()
    } else {
        message
    }
}

/// Derive the response status for a remote failure.
///
/// A reported status wins; without one, credential-looking messages become 401
/// and everything else 500. Anything outside 400..=599 collapses to 500.
pub fn resolve_remote_status(reported: Option<u16>, message: &str) -> u16 {
    let status = match reported.filter(|s| *s != 0) {
        Some(status) => status,
        None if UNAUTHORIZED_TEXT.is_match(message) => 401,
        None => 500,
    };

    if (400..=599).contains(&status) {
        status
    } else {
        500
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Remote(_) => "Remote",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Remote(err) => err.http_status(),
            AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Remote(_) => "REMOTE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Remote(ref err) => err.to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Unauthorized(_) | AppError::InvalidInput(_) | AppError::PayloadTooLarge(_) => {
                LogLevel::Debug
            }
            AppError::Remote(_) => LogLevel::Warn,
            AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_status_is_forwarded() {
        assert_eq!(resolve_remote_status(Some(403), "quotaExceeded"), 403);
        assert_eq!(resolve_remote_status(Some(503), "backend error"), 503);
    }

    #[test]
    fn reported_status_beats_unauthorized_text() {
        assert_eq!(resolve_remote_status(Some(400), "Unauthorized client"), 400);
    }

    #[test]
    fn missing_status_uses_credential_heuristic() {
        assert_eq!(resolve_remote_status(None, "Invalid Credentials"), 401);
        assert_eq!(resolve_remote_status(None, "request UNAUTHORIZED"), 401);
        assert_eq!(resolve_remote_status(None, "socket hang up"), 500);
    }

    #[test]
    fn zero_status_counts_as_absent() {
        assert_eq!(resolve_remote_status(Some(0), "invalid credentials"), 401);
        assert_eq!(resolve_remote_status(Some(0), "boom"), 500);
    }

    #[test]
    fn out_of_range_status_collapses_to_500() {
        assert_eq!(resolve_remote_status(Some(302), "redirected"), 500);
        assert_eq!(resolve_remote_status(Some(200), "odd"), 500);
        assert_eq!(resolve_remote_status(Some(600), "odd"), 500);
    }

    #[test]
    fn empty_remote_message_gets_default() {
        let err = RemoteError::api(Some(500), "  ");
        assert_eq!(err.to_string(), DEFAULT_REMOTE_MESSAGE);
        let err = RemoteError::transport("");
        assert_eq!(err.to_string(), DEFAULT_REMOTE_MESSAGE);
    }

    #[test]
    fn transport_errors_have_no_reported_status() {
        let err = RemoteError::transport("operation timed out");
        assert_eq!(err.reported_status(), None);
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn app_error_status_codes() {
        assert_eq!(
            AppError::Unauthorized("Missing Bearer token".into()).http_status_code(),
            401
        );
        assert_eq!(AppError::InvalidInput("x".into()).http_status_code(), 400);
        assert_eq!(AppError::PayloadTooLarge("x".into()).http_status_code(), 413);
        assert_eq!(
            AppError::Remote(RemoteError::api(Some(403), "quota")).http_status_code(),
            403
        );
        assert_eq!(AppError::Internal("x".into()).http_status_code(), 500);
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let err = AppError::Internal("disk full at /tmp/abc".into());
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.detailed_message().contains("disk full"));
    }

    #[test]
    fn io_errors_become_internal() {
        let err = AppError::from(io::Error::new(io::ErrorKind::NotFound, "spool missing"));
        assert!(matches!(err, AppError::Internal(ref m) if m.contains("spool missing")));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn remote_errors_expose_remote_message() {
        let err = AppError::from(RemoteError::api(Some(401), "Invalid Credentials"));
        assert_eq!(err.client_message(), "Invalid Credentials");
        assert_eq!(err.error_code(), "REMOTE_ERROR");
    }
}
