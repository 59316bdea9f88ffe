use std::convert::Infallible;
use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::{Request, StatusCode};
use ledgerly::ledgerly_token::encode_unsigned;
use ledgerly::prelude::*;
use tower::{Layer, ServiceExt, service_fn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Stand-in backend
// ---------------------------------------------------------------------------

/// Answers 200 to requests carrying a bearer credential, 401 otherwise.
async fn backend(req: Request<()>) -> Result<StatusCode, Infallible> {
    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    Ok(if authorized {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    })
}

/// The body `/auth/login` would return for `role`, valid for `ttl` seconds.
fn login_response(role: Role, now: u64, ttl: u64) -> String {
    let token = encode_unsigned(&Claims::for_role("jo@ledgerly.test", role, now, now + ttl));
    serde_json::json!({
        "token": token,
        "tokenType": "Bearer",
        "userId": 7,
        "username": "jo",
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

async fn call_api(client: &LedgerlyClient, path: &str) -> StatusCode {
    let request = Request::builder()
        .uri(path)
        .body(())
        .unwrap_or_else(|_| Request::new(()));
    client
        .auth_layer()
        .layer(service_fn(backend))
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
}

fn show(client: &LedgerlyClient, url: &str) {
    match client.navigate(url) {
        Ok(nav) => println!(
            "  navigate {url:<16} -> {} ({}, {} redirect(s))",
            nav.path,
            nav.page,
            nav.redirects.len()
        ),
        Err(e) => println!("  navigate {url:<16} -> error: {e}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::default(),
    };

    let clock = Arc::new(FixedClock::new(SystemClock.now()));
    let client = LedgerlyClient::builder()
        .config(config)
        .clock(clock.clone())
        .build()?;

    let mut role_changes = client.subscribe_role();
    tokio::spawn(async move {
        while role_changes.changed().await.is_ok() {
            let role = *role_changes.borrow_and_update();
            tracing::info!(?role, "role changed");
        }
    });

    println!("logged out:");
    show(&client, "/owner/shops");
    println!("  GET /api/shops -> {}", call_api(&client, "/api/shops").await);

    println!("logged in as owner:");
    let body = login_response(Role::Owner, clock.now(), 3600);
    client.login(&AuthResponse::from_json(&body)?);
    show(&client, "/auth/login");
    show(&client, "/owner/shops");
    show(&client, "/admin");
    show(&client, "/staff/customers/42");
    println!("  GET /api/shops -> {}", call_api(&client, "/api/shops").await);

    println!("an hour later:");
    clock.advance(3600);
    show(&client, "/owner/shops");
    println!("  GET /api/shops -> {}", call_api(&client, "/api/shops").await);

    println!("logged in as staff, then out:");
    client.login(&AuthResponse::from_json(&login_response(Role::Staff, clock.now(), 60))?);
    show(&client, "/");
    show(&client, "/staff/customers/42?tab=ledger");
    client.logout();
    show(&client, "/staff");

    tokio::task::yield_now().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn client() -> (LedgerlyClient, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(NOW));
        let client = LedgerlyClient::builder()
            .clock(clock.clone())
            .build()
            .unwrap();
        (client, clock)
    }

    #[tokio::test]
    async fn test_backend_rejects_anonymous_and_accepts_bearer() {
        let (client, _) = client();
        assert_eq!(call_api(&client, "/api").await, StatusCode::UNAUTHORIZED);

        client.login(&AuthResponse::from_json(&login_response(Role::Owner, NOW, 60)).unwrap());
        assert_eq!(call_api(&client, "/api").await, StatusCode::OK);
    }

    #[test]
    fn test_login_response_carries_role() {
        let (client, clock) = client();
        client.login(&AuthResponse::from_json(&login_response(Role::Admin, NOW, 60)).unwrap());
        assert_eq!(client.current_role(), Some(Role::Admin));

        clock.advance(60);
        assert_eq!(client.current_role(), None);
    }
}
