//! OAuth2 authorization-code flow against the Unit4 `/OAuth` endpoints.
//!
//! The authenticator mints [`Token`] values and hands them to the owning
//! client for storage; it keeps no state of its own. Token-endpoint calls
//! deliberately bypass the bearer-injection path: attaching an expired
//! bearer header to a refresh request, or refreshing recursively, would
//! make the flow un-bootstrappable.

use chrono::Utc;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::client::{Body, Unit4Client};
use crate::errors::Unit4Result;
use crate::token::{Token, TokenResponse};
use crate::transport::{HttpTransport, Method};

/// Authorization endpoint, relative to the versioned base URL.
pub const AUTHORIZE_ENDPOINT: &str = "/OAuth/Authorize";

/// Token endpoint, relative to the versioned base URL. The one path exempt
/// from bearer injection and expiry-triggered refresh.
pub const TOKEN_ENDPOINT: &str = "/OAuth/Token";

/// OAuth2 scope granting access to the web API.
pub const API_SCOPE: &str = "http://UNIT4.Multivers.API/Web/WebApi/*";

/// OAuth2 flow operations, borrowed from a [`Unit4Client`].
pub struct Authenticator<'a, T: HttpTransport> {
    client: &'a Unit4Client<T>,
}

impl<'a, T: HttpTransport> Authenticator<'a, T> {
    pub fn new(client: &'a Unit4Client<T>) -> Self {
        Self { client }
    }

    /// Build the authorization URL the end user is redirected to for
    /// consent. Pure string construction, no network call.
    pub fn authorization_url(&self, state: Option<&str>) -> String {
        let config = self.client.config();
        let mut query = vec![
            ("client_id", config.client_id.clone()),
            ("redirect_uri", config.redirect_url.clone()),
            ("scope", API_SCOPE.to_string()),
            ("response_type", "code".to_string()),
        ];
        if let Some(state) = state {
            query.push(("state", state.to_string()));
        }

        let encoded = serde_urlencoded::to_string(&query)
            .expect("string pairs always urlencode");

        format!("{}{}?{}", self.client.base_url(), AUTHORIZE_ENDPOINT, encoded)
    }

    /// Exchange an authorization code (received via the redirect) for a
    /// token. Installs the token on the client, which fires the
    /// token-update callback.
    pub async fn request_access_token(&self, code: &str) -> Unit4Result<Token> {
        let config = self.client.config();
        let params = vec![
            ("code".to_string(), code.to_string()),
            ("client_id".to_string(), config.client_id.clone()),
            (
                "client_secret".to_string(),
                config.client_secret.expose_secret().to_string(),
            ),
            ("redirect_uri".to_string(), config.redirect_url.clone()),
            ("grant_type".to_string(), "authorization_code".to_string()),
        ];

        debug!("exchanging authorization code for token");
        self.token_request(params).await
    }

    /// Refresh an expired (or soon to expire) token. Same contract as
    /// [`Self::request_access_token`]: a new token is minted, installed and
    /// returned; the input token is left untouched.
    pub async fn refresh(&self, current: &Token) -> Unit4Result<Token> {
        let config = self.client.config();
        let params = vec![
            (
                "refresh_token".to_string(),
                current.refresh_token().to_string(),
            ),
            ("client_id".to_string(), config.client_id.clone()),
            (
                "client_secret".to_string(),
                config.client_secret.expose_secret().to_string(),
            ),
            ("redirect_uri".to_string(), config.redirect_url.clone()),
            ("grant_type".to_string(), "refresh_token".to_string()),
        ];

        debug!("refreshing access token");
        self.token_request(params).await
    }

    /// Form-encoded POST to the token endpoint. Goes straight to
    /// [`Unit4Client::execute`] with no auth header, so it can never
    /// recurse into a refresh.
    async fn token_request(&self, params: Vec<(String, String)>) -> Unit4Result<Token> {
        let response = self
            .client
            .execute(Method::Post, TOKEN_ENDPOINT, None, Some(Body::Form(params)), &[])
            .await?;

        let wire = TokenResponse::from_slice(&response.body)?;
        let token = Token::from_response(wire, Utc::now());
        self.client.install_token(token.clone());
        Ok(token)
    }
}
