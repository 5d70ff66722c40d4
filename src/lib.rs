//! Unit4 Multivers Online API client
//!
//! OAuth2-authenticated binding for the Unit4 Multivers Online accounting
//! API: authorization-code flow, automatic refresh of expired tokens, and
//! one method per remote resource (products, customers, orders, invoices,
//! journals, documents).
//!
//! # Example
//!
//! ```rust,ignore
//! use unit4_client::{ClientConfig, Unit4Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .client_id("client_id")
//!         .client_secret("client_secret")
//!         .redirect_url("https://myapp.example/callback")
//!         .api_version(22)
//!         .sandbox(true)
//!         .build()?;
//!
//!     let client = Unit4Client::new(config)?;
//!     client.set_database("database");
//!
//!     // Persist every newly minted token outside the client.
//!     client.on_token_update(|token| {
//!         println!("new token, expires at {}", token.expires_at());
//!     });
//!
//!     // First run: send the user to the consent page, then exchange the
//!     // code from the redirect.
//!     println!("{}", client.auth().authorization_url(None));
//!     client.auth().request_access_token("code-from-redirect").await?;
//!
//!     // Subsequent requests refresh automatically when the token expires.
//!     let products = client.products().info_list(&[]).await?;
//!     println!("{products}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `config`: client credentials, API version and host selection
//! - `errors`: failure channels (database precondition, remote rejection,
//!   transport, auth)
//! - `token`: immutable access/refresh token value with expiry check
//! - `transport`: HTTP seam (reqwest implementation plus a mock for tests)
//! - `auth`: authorization URL, code exchange, token refresh
//! - `client`: the dispatcher every resource method calls through
//! - `services`: per-resource methods built on the dispatcher

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod token;
pub mod transport;

// Re-export main client
pub use client::{TokenUpdateCallback, Unit4Client};

// Re-export configuration
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};

// Re-export errors
pub use errors::{
    AuthError, DatabaseError, RequestError, TransportError, Unit4Error, Unit4Result,
};

// Re-export token types
pub use token::{Token, TokenResponse};

// Re-export auth
pub use auth::{Authenticator, API_SCOPE, AUTHORIZE_ENDPOINT, TOKEN_ENDPOINT};

// Re-export transport seam
pub use transport::{
    HttpTransport, Method, MockTransport, ReqwestTransport, TransportRequest, TransportResponse,
};

// Re-export services
pub use services::{
    AccountsService, CustomersService, DocumentsService, InvoicesService, JournalsService,
    OrdersService, ProductsService, TemplatesService,
};
