mod common;

use std::sync::Arc;

use moodplay::{
    api::{PendingLogin, SharedLogin},
    server::router,
};
use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::Value;
use tokio::sync::Mutex;

use common::serve;

fn no_redirects() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

async fn start(pending: Option<PendingLogin>) -> (String, SharedLogin) {
    let shared: SharedLogin = Arc::new(Mutex::new(pending));
    let base = serve(router(shared.clone())).await;
    (base, shared)
}

#[tokio::test]
async fn test_callback_stores_query_and_redirects_home() {
    let (base, shared) = start(Some(PendingLogin::new("nonce"))).await;

    let response = no_redirects()
        .get(format!("{}/callback?code=abc&state=nonce", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let pending = shared.lock().await;
    assert_eq!(
        pending.as_ref().unwrap().query.as_deref(),
        Some("code=abc&state=nonce")
    );
}

#[tokio::test]
async fn test_callback_with_wrong_state_is_rejected() {
    let (base, shared) = start(Some(PendingLogin::new("nonce"))).await;

    let response = no_redirects()
        .get(format!("{}/callback?code=abc&state=forged", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(shared.lock().await.as_ref().unwrap().query.is_none());
}

#[tokio::test]
async fn test_callback_without_pending_login() {
    let (base, _shared) = start(None).await;

    let response = no_redirects()
        .get(format!("{}/callback?code=abc&state=nonce", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_denied_authorization_is_still_handed_over() {
    let (base, shared) = start(Some(PendingLogin::new("nonce"))).await;

    let response = no_redirects()
        .get(format!("{}/callback?error=access_denied&state=nonce", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        shared.lock().await.as_ref().unwrap().query.as_deref(),
        Some("error=access_denied&state=nonce")
    );
}

#[tokio::test]
async fn test_health_and_home() {
    let (base, _shared) = start(None).await;
    let client = no_redirects();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["name"], "moodplay");

    let home = client.get(&base).send().await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert!(home.text().await.unwrap().contains("Mood Music"));
}
