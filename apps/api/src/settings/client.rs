//! Client identity for settings scopes.
//!
//! Each caller names itself with an `X-Client-Id` header. Privacy settings,
//! the anonymous id and the resume draft live under that client's scope, so
//! one client's opt-in never covers another.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;

pub const CLIENT_ID_HEADER: &str = "x-client-id";
const MAX_CLIENT_ID_CHARS: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Accepts 1 to 128 ASCII letters, digits, `-` or `_`, after trimming.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = raw.trim();
        if id.is_empty() || id.len() > MAX_CLIENT_ID_CHARS {
            return Err(AppError::Validation(format!(
                "{CLIENT_ID_HEADER} must be 1 to {MAX_CLIENT_ID_CHARS} characters"
            )));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(AppError::Validation(format!(
                "{CLIENT_ID_HEADER} may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Validation(format!("Missing {CLIENT_ID_HEADER} header")))?;
        ClientId::parse(raw)
    }
}
