//! Client configuration.
//!
//! Fixed at construction: OAuth2 application credentials, redirect URL, API
//! version and the sandbox/production host selection. The database (tenant
//! namespace) is deliberately *not* part of the configuration; it is set
//! once on the client after construction.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

const PRODUCTION_HOST: &str = "https://api.online.unit4.nl";
const SANDBOX_HOST: &str = "https://sandbox.api.online.unit4.nl";

/// Configuration for [`Unit4Client`](crate::client::Unit4Client).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_url: String,
    /// Versioned base path selector (`/v{api_version}`).
    pub api_version: u32,
    /// Selects the sandbox host instead of production.
    pub sandbox: bool,
    /// Request timeout forwarded to the transport.
    pub timeout: Duration,
    /// Disable TLS certificate verification. Off by default; only for
    /// talking to test endpoints with self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Base URL every request is issued against, combining host selection
    /// and API version: `https://{host}/v{version}`.
    pub fn base_url(&self) -> String {
        let host = if self.sandbox {
            SANDBOX_HOST
        } else {
            PRODUCTION_HOST
        };
        format!("{}/v{}", host, self.api_version)
    }
}

/// Configuration validation error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
}

/// Fluent builder for [`ClientConfig`].
#[derive(Default)]
pub struct ClientConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    redirect_url: Option<String>,
    api_version: Option<u32>,
    sandbox: bool,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OAuth2 client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the OAuth2 client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set the redirect URL registered for the application.
    pub fn redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Set the API version (default 21).
    pub fn api_version(mut self, version: u32) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Target the sandbox environment.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Set the request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept invalid TLS certificates. Not recommended outside of tests.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig {
            client_id: self
                .client_id
                .filter(|id| !id.is_empty())
                .ok_or(ConfigError::MissingField { field: "client_id" })?,
            client_secret: self
                .client_secret
                .ok_or(ConfigError::MissingField {
                    field: "client_secret",
                })?,
            redirect_url: self
                .redirect_url
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::MissingField {
                    field: "redirect_url",
                })?,
            api_version: self.api_version.unwrap_or(21),
            sandbox: self.sandbox,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ClientConfigBuilder {
        ClientConfig::builder()
            .client_id("client_id")
            .client_secret("client_secret")
            .redirect_url("https://example.com/callback")
    }

    #[test]
    fn production_base_url() {
        let config = builder().api_version(22).build().unwrap();
        assert_eq!(config.base_url(), "https://api.online.unit4.nl/v22");
    }

    #[test]
    fn sandbox_base_url() {
        let config = builder().api_version(22).sandbox(true).build().unwrap();
        assert_eq!(config.base_url(), "https://sandbox.api.online.unit4.nl/v22");
    }

    #[test]
    fn api_version_defaults_to_21() {
        let config = builder().build().unwrap();
        assert_eq!(config.api_version, 21);
        assert_eq!(config.base_url(), "https://api.online.unit4.nl/v21");
    }

    #[test]
    fn missing_client_id_rejected() {
        let err = ClientConfig::builder()
            .client_secret("secret")
            .redirect_url("https://example.com/callback")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn tls_verification_on_by_default() {
        let config = builder().build().unwrap();
        assert!(!config.accept_invalid_certs);
    }
}
