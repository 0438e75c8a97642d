use std::sync::Arc;

use syncrodoc_api::{AppStateInner, router::router, token::TokenIssuer};
use syncrodoc_client::{AuthClient, ClientError, SessionCache, SessionEntry};
use syncrodoc_db::Database;
use syncrodoc_types::api::UserProfile;

const TEST_SECRET: &str = "test-secret-0123456789abcdef0123456789abcdef";

/// Serve a real router with an in-memory store on an ephemeral port.
async fn spawn_server() -> String {
    let db = Database::open_in_memory().expect("in-memory db");
    let state = Arc::new(AppStateInner {
        db,
        tokens: TokenIssuer::new(TEST_SECRET),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state, None)).await.unwrap();
    });
    format!("http://{addr}")
}

fn seeded_cache(token: &str) -> SessionCache {
    let cache = SessionCache::in_memory();
    cache
        .save(&SessionEntry {
            token: token.into(),
            user: UserProfile {
                id: 1,
                username: "alice".into(),
                email: "a@x.com".into(),
                created_at: None,
            },
        })
        .unwrap();
    cache
}

#[tokio::test]
async fn register_login_profile_roundtrip() {
    let base = spawn_server().await;
    let client = AuthClient::new(base.clone(), SessionCache::in_memory());

    let user = client
        .register("alice", "a@x.com", "longpass1", "longpass1")
        .await
        .unwrap();
    assert!(client.is_authenticated());
    assert_eq!(user.username, "alice");

    let fetched = client.profile().await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "a@x.com");
    assert!(client.verify().await);

    // Email works as the login identifier too.
    let by_email = AuthClient::new(base, SessionCache::in_memory());
    let logged_in = by_email.login("a@x.com", "longpass1").await.unwrap();
    assert_eq!(logged_in.id, user.id);
}

#[tokio::test]
async fn login_failure_surfaces_the_server_message() {
    let base = spawn_server().await;
    let client = AuthClient::new(base, SessionCache::in_memory());

    let err = client.login("alice", "wrongpass").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid username/email or password");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn logout_clears_cache_even_when_server_is_unreachable() {
    // Nothing listens here, so the best-effort notify can only fail.
    let client = AuthClient::new("http://127.0.0.1:9", seeded_cache("tok"));
    assert!(client.is_authenticated());

    client.logout().await.unwrap();
    assert!(!client.is_authenticated());
    assert!(client.cache().load().is_none());
}

#[tokio::test]
async fn logout_clears_cache_when_server_rejects_the_token() {
    let base = spawn_server().await;
    let client = AuthClient::new(base, seeded_cache("garbage-token"));

    client.logout().await.unwrap();
    assert!(client.cache().load().is_none());
}

#[tokio::test]
async fn restore_session_clears_a_stale_token() {
    let base = spawn_server().await;
    let client = AuthClient::new(base, seeded_cache("garbage-token"));
    assert!(client.is_authenticated());

    let restored = client.restore_session().await.unwrap();
    assert!(restored.is_none());
    // The tampered record must not linger as an apparent session.
    assert!(!client.is_authenticated());
    assert!(client.cache().load().is_none());
}

#[tokio::test]
async fn restore_session_honors_a_valid_cached_token() {
    let base = spawn_server().await;
    let client = AuthClient::new(base.clone(), SessionCache::in_memory());
    client
        .register("alice", "a@x.com", "longpass1", "longpass1")
        .await
        .unwrap();

    let restored = client.restore_session().await.unwrap().unwrap();
    assert_eq!(restored.username, "alice");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn restore_session_with_no_cache_is_none() {
    let client = AuthClient::new("http://127.0.0.1:9", SessionCache::in_memory());
    assert!(client.restore_session().await.unwrap().is_none());
}
