use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};

use crate::{
    api::{self, SharedLogin},
    error::{Error, Result},
};

pub fn router(state: SharedLogin) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback router on `addr` until the task is dropped.
pub async fn start_api_server(addr: &str, state: SharedLogin) -> Result<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("invalid server address '{}': {}", addr, e)))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
