use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing_authorization")]
    Missing,
    #[error("authorization_failed")]
    Mismatch,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Missing => "missing_authorization",
            AuthError::Mismatch => "authorization_failed",
        }
    }
}

/// Mask sensitive tokens for logs while keeping useful context
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len > 12 {
        let head: String = token.chars().take(6).collect();
        let tail: String = token.chars().skip(len - 4).collect();
        format!("{}...{}", head, tail)
    } else if !token.is_empty() {
        "***".to_string()
    } else {
        "<empty>".into()
    }
}

/// Extract the token of an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Gate a request on the configured shared secret. No configured key means open access.
pub fn authorize(headers: &HeaderMap, expected: Option<&str>) -> Result<(), AuthError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let Some(token) = extract_bearer_token(headers) else {
        log::warn!("❌ Request rejected: no bearer token");
        return Err(AuthError::Missing);
    };
    if token == expected {
        Ok(())
    } else {
        log::warn!("❌ Request rejected: bearer token {} does not match", mask_token(token));
        Err(AuthError::Mismatch)
    }
}
