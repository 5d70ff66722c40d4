//! Black-box tests of the dispatch invariants: auth-header injection, the
//! token-endpoint exemption, refresh-on-expiry, the database precondition
//! and error classification.

use bytes::Bytes;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use unit4_client::{
    ClientConfig, Method, MockTransport, Token, TransportError, Unit4Client, Unit4Error,
    TOKEN_ENDPOINT,
};

fn sandbox_client() -> Unit4Client<MockTransport> {
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

fn valid_token() -> Token {
    Token::new("valid-access", "valid-refresh", Utc::now() + Duration::hours(1))
}

fn expired_token() -> Token {
    Token::new("stale-access", "stale-refresh", Utc::now() - Duration::hours(1))
}

fn token_response() -> serde_json::Value {
    json!({
        "access_token": "fresh-access",
        "refresh_token": "fresh-refresh",
        "expires_in": 3600,
    })
}

#[tokio::test]
async fn resource_call_carries_bearer_and_base_headers() {
    let client = sandbox_client();
    client.set_database("acme");
    client.set_token(valid_token());
    client.transport().queue_json(200, &json!([]));

    client.products().info_list(&[]).await.unwrap();

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.method, Method::Get);
    assert_eq!(
        request.url,
        "https://sandbox.api.online.unit4.nl/v22/api/acme/ProductInfoList"
    );
    assert_eq!(request.header("accept"), Some("application/json"));
    assert_eq!(request.header("cache-control"), Some("no-cache"));
    assert_eq!(request.header("connection"), Some("close"));
    assert_eq!(request.header("authorization"), Some("Bearer valid-access"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn token_endpoint_never_gets_bearer_header() {
    let client = sandbox_client();
    client.set_token(valid_token());
    client.transport().queue_json(200, &token_response());

    // Even a direct POST against the token endpoint is exempt from auth
    // injection.
    client
        .post(TOKEN_ENDPOINT, json!({}), &[])
        .await
        .unwrap();

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.header("authorization"), None);
}

#[tokio::test]
async fn expired_token_triggers_exactly_one_refresh_before_the_call() {
    let client = sandbox_client();
    client.set_database("acme");
    client.set_token(expired_token());
    client.transport().queue_json(200, &token_response());
    client.transport().queue_json(200, &json!([]));

    client.products().info_list(&[]).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);

    // First wire call is the refresh, form-encoded and unauthenticated.
    assert_eq!(
        requests[0].url,
        "https://sandbox.api.online.unit4.nl/v22/OAuth/Token"
    );
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].header("authorization"), None);
    let fields: Vec<(String, String)> =
        serde_urlencoded::from_bytes(requests[0].body.as_ref().unwrap()).unwrap();
    assert!(fields.contains(&("grant_type".to_string(), "refresh_token".to_string())));
    assert!(fields.contains(&("refresh_token".to_string(), "stale-refresh".to_string())));

    // The original call then proceeds with the refreshed bearer token.
    assert_eq!(
        requests[1].header("authorization"),
        Some("Bearer fresh-access")
    );

    // The held token was replaced, never mutated in place.
    assert_eq!(client.token().unwrap().access_token(), "fresh-access");
}

#[tokio::test]
async fn refresh_fires_token_update_callback() {
    let client = sandbox_client();
    client.set_database("acme");
    client.set_token(expired_token());

    let updates = Arc::new(AtomicUsize::new(0));
    let seen = updates.clone();
    client.on_token_update(move |token| {
        assert_eq!(token.access_token(), "fresh-access");
        seen.fetch_add(1, Ordering::SeqCst);
    });

    client.transport().queue_json(200, &token_response());
    client.transport().queue_json(200, &json!([]));

    client.products().info_list(&[]).await.unwrap();
    assert_eq!(updates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_refresh_propagates_and_skips_the_original_call() {
    let client = sandbox_client();
    client.set_database("acme");
    client.set_token(expired_token());
    client.transport().queue_error(TransportError::Status {
        status: 400,
        body: Bytes::from_static(br#"{"error":"invalid_grant"}"#),
    });

    let err = client.products().info_list(&[]).await.unwrap_err();
    match err {
        Unit4Error::Request(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.payload, json!({"error": "invalid_grant"}));
        }
        other => panic!("expected RequestError, got {other:?}"),
    }

    // Only the refresh attempt hit the wire.
    assert_eq!(client.transport().call_count(), 1);
    // The stale token is still held; nothing was installed.
    assert_eq!(client.token().unwrap().access_token(), "stale-access");
}

#[tokio::test]
async fn missing_database_fails_before_any_network_call() {
    let client = sandbox_client();
    client.set_token(valid_token());

    let err = client.products().info_list(&[]).await.unwrap_err();
    match err {
        Unit4Error::Database(e) => {
            assert_eq!(e.operation, "ProductsService::info_list");
        }
        other => panic!("expected DatabaseError, got {other:?}"),
    }
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn json_error_body_becomes_request_error() {
    let client = sandbox_client();
    client.set_database("acme");
    client.transport().queue_error(TransportError::Status {
        status: 400,
        body: Bytes::from_static(br#"{"error":"invalid_grant"}"#),
    });

    let err = client.customers().info_list().await.unwrap_err();
    match err {
        Unit4Error::Request(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.payload, json!({"error": "invalid_grant"}));
        }
        other => panic!("expected RequestError, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_stays_a_transport_error() {
    let client = sandbox_client();
    client.set_database("acme");
    client.transport().queue_error(TransportError::Status {
        status: 500,
        body: Bytes::from_static(b"<html>Internal Server Error</html>"),
    });

    let err = client.customers().info_list().await.unwrap_err();
    match err {
        Unit4Error::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(&body[..], b"<html>Internal Server Error</html>");
        }
        other => panic!("expected TransportError::Status, got {other:?}"),
    }
}

#[tokio::test]
async fn network_failure_propagates_unchanged() {
    let client = sandbox_client();
    client.set_database("acme");
    client.transport().queue_error(TransportError::ConnectionFailed {
        message: "connection refused".to_string(),
    });

    let err = client.customers().info_list().await.unwrap_err();
    assert!(matches!(
        err,
        Unit4Error::Transport(TransportError::ConnectionFailed { .. })
    ));
}

#[tokio::test]
async fn query_parameters_are_urlencoded_onto_the_path() {
    let client = sandbox_client();
    client.set_database("acme");
    client.transport().queue_json(200, &json!([]));

    client
        .orders()
        .open_orders(&[
            ("customerId".to_string(), "D 1001".to_string()),
            ("orderDate".to_string(), "2024-01-01".to_string()),
        ])
        .await
        .unwrap();

    let request = client.transport().last_request().unwrap();
    assert_eq!(
        request.url,
        "https://sandbox.api.online.unit4.nl/v22/api/acme/OrderInfoList/OpenOrders?customerId=D+1001&orderDate=2024-01-01"
    );
}

#[tokio::test]
async fn post_encodes_json_body() {
    let client = sandbox_client();
    client.set_database("acme");
    client.transport().queue_json(200, &json!({"productId": "P1"}));

    let data = json!({"description": "Widget"});
    client.products().create(data.clone()).await.unwrap();

    let request = client.transport().last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.header("content-type"), Some("application/json"));
    let sent: serde_json::Value =
        serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(sent, data);
}

#[tokio::test]
async fn document_retrieval_returns_raw_bytes() {
    let client = sandbox_client();
    client.set_database("acme");
    client.set_token(valid_token());

    let pdf = Bytes::from_static(b"%PDF-1.7 not actually json");
    client
        .transport()
        .queue_response(unit4_client::TransportResponse {
            status: 200,
            body: pdf.clone(),
        });

    let body = client
        .documents()
        .invoice_by_order_id("42", &[("format".to_string(), "1".to_string())])
        .await
        .unwrap();
    assert_eq!(body, pdf);

    let request = client.transport().last_request().unwrap();
    assert_eq!(
        request.url,
        "https://sandbox.api.online.unit4.nl/v22/api/acme/Documents/Invoice/ByOrderId/42?format=1"
    );
}

#[test]
fn authorization_url_roundtrips_its_query() {
    let client = sandbox_client();
    let url = client.auth().authorization_url(Some("abc"));

    let (base, query) = url.split_once('?').unwrap();
    assert_eq!(
        base,
        "https://sandbox.api.online.unit4.nl/v22/OAuth/Authorize"
    );
    let parsed: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap();
    assert_eq!(
        parsed,
        vec![
            ("client_id".to_string(), "client_id".to_string()),
            (
                "redirect_uri".to_string(),
                "https://example.com/callback".to_string()
            ),
            (
                "scope".to_string(),
                "http://UNIT4.Multivers.API/Web/WebApi/*".to_string()
            ),
            ("response_type".to_string(), "code".to_string()),
            ("state".to_string(), "abc".to_string()),
        ]
    );
}
