//! The layer in a tower stack, fed by a real session.

use std::convert::Infallible;
use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Request};
use ledgerly_http::{BearerAuth, BearerAuthLayer};
use ledgerly_session::{AuthResponse, Session, SessionConfig};
use ledgerly_storage::CredentialStore;
use ledgerly_token::{Claims, FixedClock, Role, encode_unsigned};
use tower::{Layer, ServiceExt, service_fn};

const NOW: u64 = 1_700_000_000;

/// Echoes back the headers the inner service received.
async fn echo_headers(req: Request<()>) -> Result<HeaderMap, Infallible> {
    Ok(req.headers().clone())
}

fn json_request() -> Request<()> {
    Request::builder()
        .uri("/api/customers")
        .header(CONTENT_TYPE, "application/json")
        .body(())
        .unwrap()
}

fn setup() -> (Session, BearerAuthLayer) {
    let store = CredentialStore::in_memory();
    let config = SessionConfig::default();
    let layer = BearerAuthLayer::new(BearerAuth::new(store.clone(), &config.token_key));
    let session = Session::with_clock(store, config, Arc::new(FixedClock::new(NOW)));
    (session, layer)
}

#[tokio::test]
async fn test_layer_adds_header_after_login() {
    let (session, layer) = setup();
    let token = encode_unsigned(&Claims::for_role("o@example.com", Role::Owner, NOW, NOW + 60));
    session.login(&AuthResponse::new(token.clone()));

    let headers = layer
        .layer(service_fn(echo_headers))
        .oneshot(json_request())
        .await
        .unwrap();

    assert_eq!(headers[AUTHORIZATION], format!("Bearer {token}").as_str());
    assert_eq!(headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_layer_sends_anonymously_after_logout() {
    let (session, layer) = setup();
    session.login_with_token("a.b.c");
    session.logout();

    let headers = layer
        .layer(service_fn(echo_headers))
        .oneshot(json_request())
        .await
        .unwrap();

    assert!(headers.get(AUTHORIZATION).is_none());
    assert_eq!(headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_layer_forwards_expired_credential_untouched() {
    // The augmentor never judges validity; the backend answers 401.
    let (session, layer) = setup();
    let expired = encode_unsigned(&Claims::for_role("s@example.com", Role::Staff, 0, 1));
    session.login_with_token(&expired);
    assert!(!session.is_authenticated());

    let headers = layer
        .layer(service_fn(echo_headers))
        .oneshot(json_request())
        .await
        .unwrap();

    assert_eq!(headers[AUTHORIZATION], format!("Bearer {expired}").as_str());
}
