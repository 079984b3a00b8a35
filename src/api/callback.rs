use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::{Query, RawQuery},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::sync::Mutex;

use crate::warning;

/// A login waiting for Spotify to redirect back.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    /// `state` nonce sent with the authorization request.
    pub state: String,
    /// Raw query string of the redirect, once it arrived.
    pub query: Option<String>,
}

impl PendingLogin {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            query: None,
        }
    }
}

pub type SharedLogin = Arc<Mutex<Option<PendingLogin>>>;

/// Receives the authorization redirect, hands its query to the waiting login
/// flow and forwards the browser to the home page.
pub async fn callback(
    RawQuery(query): RawQuery,
    Query(params): Query<HashMap<String, String>>,
    Extension(shared): Extension<SharedLogin>,
) -> Response {
    let mut pending = shared.lock().await;
    let Some(login) = pending.as_mut() else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>No login in progress.</h4>"),
        )
            .into_response();
    };

    if params.get("state") != Some(&login.state) {
        warning!("Ignoring authorization callback with an unexpected state.");
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Login state mismatch.</h4>"),
        )
            .into_response();
    }

    if let Some(error) = params.get("error") {
        warning!("Authorization was not granted: {}", error);
    }

    login.query = Some(query.unwrap_or_default());
    Redirect::to("/").into_response()
}
