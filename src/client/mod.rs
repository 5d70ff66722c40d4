//! Unit4 API client: the single choke point every resource call passes
//! through.
//!
//! The client owns the session state (held token, database, token-update
//! callback) and enforces the two cross-cutting invariants: bearer-token
//! injection with a single refresh-on-expiry step, and the database
//! precondition on every resource method. Everything network-shaped goes
//! through [`Unit4Client::execute`], which also classifies failures.

use bytes::Bytes;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::auth::{Authenticator, TOKEN_ENDPOINT};
use crate::config::ClientConfig;
use crate::errors::{DatabaseError, RequestError, TransportError, Unit4Result};
use crate::services::{
    AccountsService, CustomersService, DocumentsService, InvoicesService, JournalsService,
    OrdersService, ProductsService, TemplatesService,
};
use crate::token::Token;
use crate::transport::{
    HttpTransport, Method, ReqwestTransport, TransportRequest, TransportResponse,
};

/// Callback invoked with every newly minted token, so the caller can
/// persist it outside the client (session storage, database, ...).
pub type TokenUpdateCallback = Box<dyn Fn(&Token) + Send + Sync>;

/// Request body prior to encoding.
#[derive(Clone, Debug)]
pub(crate) enum Body {
    /// Encoded as `application/json`.
    Json(Value),
    /// Encoded as `application/x-www-form-urlencoded` (token endpoint).
    Form(Vec<(String, String)>),
}

/// Client for the Unit4 Multivers Online API.
///
/// Generic over the transport so tests can inject a
/// [`MockTransport`](crate::transport::MockTransport); production use goes
/// through [`Unit4Client::new`] with the reqwest-backed default.
pub struct Unit4Client<T: HttpTransport = ReqwestTransport> {
    config: ClientConfig,
    base_url: String,
    transport: Arc<T>,
    token: Mutex<Option<Token>>,
    database: Mutex<Option<String>>,
    on_token_update: Mutex<Option<TokenUpdateCallback>>,
}

impl Unit4Client<ReqwestTransport> {
    /// Create a client with the default reqwest transport.
    pub fn new(config: ClientConfig) -> Unit4Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, config.accept_invalid_certs)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> Unit4Client<T> {
    /// Create a client with a custom transport implementation.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let base_url = config.base_url();
        Self {
            config,
            base_url,
            transport: Arc::new(transport),
            token: Mutex::new(None),
            database: Mutex::new(None),
            on_token_update: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL every request is issued against, fixed at construction.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport. Mainly useful for inspecting a
    /// [`MockTransport`](crate::transport::MockTransport) in tests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========== Session state ==========

    /// Set the database (tenant namespace) required by every resource
    /// method.
    pub fn set_database(&self, database: impl Into<String>) {
        *self.database.lock().unwrap() = Some(database.into());
    }

    pub fn database(&self) -> Option<String> {
        self.database.lock().unwrap().clone()
    }

    /// Install a token obtained out-of-band (e.g. restored from the
    /// caller's storage). Does not invoke the token-update callback.
    pub fn set_token(&self, token: Token) {
        *self.token.lock().unwrap() = Some(token);
    }

    /// The currently held token, if any.
    pub fn token(&self) -> Option<Token> {
        self.token.lock().unwrap().clone()
    }

    /// Register the callback invoked with every newly minted token.
    pub fn on_token_update(&self, callback: impl Fn(&Token) + Send + Sync + 'static) {
        *self.on_token_update.lock().unwrap() = Some(Box::new(callback));
    }

    /// Replace the held token with a freshly minted one and notify the
    /// caller. Called by the [`Authenticator`] after every successful
    /// exchange or refresh.
    pub(crate) fn install_token(&self, token: Token) {
        *self.token.lock().unwrap() = Some(token.clone());
        if let Some(callback) = self.on_token_update.lock().unwrap().as_ref() {
            callback(&token);
        }
    }

    /// Database guard: every resource method calls this before building its
    /// path. Fails without any network activity when no database is set.
    pub(crate) fn require_database(&self, operation: &str) -> Unit4Result<String> {
        self.database()
            .ok_or_else(|| DatabaseError::new(operation).into())
    }

    // ========== Service accessors ==========

    /// OAuth2 authorization and token lifecycle.
    pub fn auth(&self) -> Authenticator<'_, T> {
        Authenticator::new(self)
    }

    pub fn products(&self) -> ProductsService<'_, T> {
        ProductsService::new(self)
    }

    pub fn customers(&self) -> CustomersService<'_, T> {
        CustomersService::new(self)
    }

    pub fn orders(&self) -> OrdersService<'_, T> {
        OrdersService::new(self)
    }

    pub fn invoices(&self) -> InvoicesService<'_, T> {
        InvoicesService::new(self)
    }

    pub fn journals(&self) -> JournalsService<'_, T> {
        JournalsService::new(self)
    }

    pub fn accounts(&self) -> AccountsService<'_, T> {
        AccountsService::new(self)
    }

    pub fn documents(&self) -> DocumentsService<'_, T> {
        DocumentsService::new(self)
    }

    pub fn templates(&self) -> TemplatesService<'_, T> {
        TemplatesService::new(self)
    }

    // ========== Verb helpers ==========

    /// GET a JSON resource.
    pub async fn get(&self, endpoint: &str, query: &[(String, String)]) -> Unit4Result<Value> {
        self.dispatch_json(Method::Get, endpoint, None, query).await
    }

    /// GET a raw (binary) resource, e.g. a PDF document.
    pub async fn get_raw(&self, endpoint: &str, query: &[(String, String)]) -> Unit4Result<Bytes> {
        let response = self.dispatch(Method::Get, endpoint, None, query).await?;
        Ok(response.body)
    }

    /// POST a JSON body.
    pub async fn post(
        &self,
        endpoint: &str,
        data: Value,
        query: &[(String, String)],
    ) -> Unit4Result<Value> {
        self.dispatch_json(Method::Post, endpoint, Some(Body::Json(data)), query)
            .await
    }

    /// PUT a JSON body.
    pub async fn put(
        &self,
        endpoint: &str,
        data: Value,
        query: &[(String, String)],
    ) -> Unit4Result<Value> {
        self.dispatch_json(Method::Put, endpoint, Some(Body::Json(data)), query)
            .await
    }

    /// DELETE a resource.
    pub async fn delete(&self, endpoint: &str, query: &[(String, String)]) -> Unit4Result<Value> {
        self.dispatch_json(Method::Delete, endpoint, None, query)
            .await
    }

    // ========== Dispatch ==========

    async fn dispatch_json(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Body>,
        query: &[(String, String)],
    ) -> Unit4Result<Value> {
        let response = self.dispatch(method, endpoint, body, query).await?;
        decode_json(&response)
    }

    /// Auth-injecting dispatch path. Attaches a bearer header for every
    /// endpoint except the token endpoint, refreshing the held token first
    /// if it has expired.
    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Body>,
        query: &[(String, String)],
    ) -> Unit4Result<TransportResponse> {
        let mut auth_header = None;

        if endpoint != TOKEN_ENDPOINT {
            if let Some(held) = self.token() {
                let token = if held.is_expired() {
                    debug!(endpoint, "held token expired, refreshing");
                    // Single refresh step; a failing refresh propagates and
                    // the original call is not attempted.
                    self.auth().refresh(&held).await?
                } else {
                    held
                };
                auth_header = Some((
                    "Authorization".to_string(),
                    format!("Bearer {}", token.access_token()),
                ));
            }
        }

        self.execute(method, endpoint, auth_header, body, query)
            .await
    }

    /// Transport-facing request path, shared by regular dispatch and the
    /// token endpoint (which bypasses auth injection entirely). Encodes the
    /// body, appends the query string and classifies failures.
    pub(crate) async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        auth_header: Option<(String, String)>,
        body: Option<Body>,
        query: &[(String, String)],
    ) -> Unit4Result<TransportResponse> {
        let mut headers = vec![
            ("Cache-Control".to_string(), "no-cache".to_string()),
            ("Connection".to_string(), "close".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(header) = auth_header {
            headers.push(header);
        }

        let mut body_bytes = None;
        if matches!(method, Method::Post | Method::Put) {
            match body {
                Some(Body::Json(data)) => {
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                    let encoded =
                        serde_json::to_vec(&data).map_err(|e| TransportError::InvalidBody {
                            message: e.to_string(),
                        })?;
                    body_bytes = Some(Bytes::from(encoded));
                }
                Some(Body::Form(fields)) => {
                    headers.push((
                        "Content-Type".to_string(),
                        "application/x-www-form-urlencoded".to_string(),
                    ));
                    let encoded = serde_urlencoded::to_string(&fields).map_err(|e| {
                        TransportError::InvalidBody {
                            message: e.to_string(),
                        }
                    })?;
                    body_bytes = Some(Bytes::from(encoded));
                }
                None => {}
            }
        }

        let mut url = format!("{}{}", self.base_url, endpoint);
        if !query.is_empty() {
            let encoded =
                serde_urlencoded::to_string(query).map_err(|e| TransportError::InvalidBody {
                    message: e.to_string(),
                })?;
            url.push('?');
            url.push_str(&encoded);
        }

        debug!(method = method.as_str(), %url, "dispatching request");

        let request = TransportRequest {
            method,
            url,
            headers,
            body: body_bytes,
        };

        match self.transport.send(request).await {
            Ok(response) => Ok(response),
            // An HTTP failure whose body decodes as JSON becomes a
            // structured RequestError; anything else is re-raised unchanged.
            Err(TransportError::Status { status, body }) => {
                match serde_json::from_slice::<Value>(&body) {
                    Ok(payload) => Err(RequestError { status, payload }.into()),
                    Err(_) => Err(TransportError::Status { status, body }.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Decode a successful response body. Empty bodies decode to `Null`,
/// matching endpoints that reply 2xx without content.
fn decode_json(response: &TransportResponse) -> Unit4Result<Value> {
    if response.body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&response.body).map_err(|e| {
        TransportError::InvalidBody {
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::MockTransport;

    fn test_client() -> Unit4Client<MockTransport> {
        let config = ClientConfig::builder()
            .client_id("client_id")
            .client_secret("client_secret")
            .redirect_url("https://example.com/callback")
            .api_version(22)
            .sandbox(true)
            .build()
            .unwrap();
        Unit4Client::with_transport(config, MockTransport::new())
    }

    #[test]
    fn base_url_is_fixed_at_construction() {
        let client = test_client();
        assert_eq!(client.base_url(), "https://sandbox.api.online.unit4.nl/v22");
    }

    #[test]
    fn require_database_fails_until_set() {
        let client = test_client();
        let err = client.require_database("OrdersService::get").unwrap_err();
        assert!(err.to_string().contains("OrdersService::get"));

        client.set_database("acme");
        assert_eq!(client.require_database("OrdersService::get").unwrap(), "acme");
    }

    #[test]
    fn set_token_does_not_fire_callback() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let client = test_client();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        client.on_token_update(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        client.set_token(Token::new("a", "r", chrono::Utc::now()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        client.install_token(Token::new("b", "r2", chrono::Utc::now()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.token().unwrap().access_token(), "b");
    }

    #[test]
    fn decode_json_empty_body_is_null() {
        let response = TransportResponse {
            status: 200,
            body: Bytes::new(),
        };
        assert_eq!(decode_json(&response).unwrap(), Value::Null);
    }
}
