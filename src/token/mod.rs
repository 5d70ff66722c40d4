//! Access/refresh token pair with an absolute expiry instant.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::errors::AuthError;

/// Immutable token value. Lifecycle progression (exchange, refresh) always
/// produces a new `Token`; an existing one is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
        }
    }

    /// Build a token from a token-endpoint response, anchoring `expires_in`
    /// at the given instant.
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: now + Duration::seconds(response.expires_in),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True when the current time is at or after the expiry instant.
    /// No grace window.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Wire shape of the `/OAuth/Token` endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds, relative to the moment the response was issued.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Decode a token response body, mapping any missing or mistyped field
    /// to an [`AuthError`].
    pub fn from_slice(body: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(body).map_err(|e| AuthError::InvalidTokenResponse {
            message: e.to_string(),
        })
    }
}
