use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use vidrelay_core::{AppError, BearerToken};

use crate::error::HttpAppError;

pub const MISSING_TOKEN_MESSAGE: &str = "Missing Bearer token";

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the caller's access token from `Authorization: Bearer <token>`.
///
/// Runs on request parts only, so a missing token is rejected before any of
/// the body is read.
#[derive(Debug, Clone)]
pub struct Bearer(pub BearerToken);

impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        parse_authorization(header).map(Bearer).map_err(HttpAppError)
    }
}

/// Parse an `Authorization` header value into a token.
///
/// The scheme is matched exactly; anything after it is trimmed and must be non-empty.
pub fn parse_authorization(header: Option<&str>) -> Result<BearerToken, AppError> {
    let token = header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()))?;

    Ok(BearerToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_scheme() {
        let token = parse_authorization(Some("Bearer ya29.abc")).unwrap();
        assert_eq!(token.expose(), "ya29.abc");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let token = parse_authorization(Some("Bearer   tok  ")).unwrap();
        assert_eq!(token.expose(), "tok");
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        for header in [None, Some(""), Some("Basic dXNlcjpwYXNz"), Some("bearer tok"), Some("Bearer")] {
            let err = parse_authorization(header).unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(ref m) if m == MISSING_TOKEN_MESSAGE));
        }
    }

    #[test]
    fn rejects_empty_token() {
        assert!(parse_authorization(Some("Bearer ")).is_err());
        assert!(parse_authorization(Some("Bearer    ")).is_err());
    }
}
