use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;
use url::Url;

use crate::{
    api::{PendingLogin, SharedLogin},
    auth::AuthSession,
    config, error, info,
    server::start_api_server,
    spotify::{SpotifyClient, auth::generate_state},
    storage::FileStore,
    success, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the browser authorization flow and stores the resulting session.
pub async fn login() {
    let client = match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot start login: {}", e),
    };

    let state = generate_state();
    let auth_url = match client.authorize_url(&state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    let shared: SharedLogin = Arc::new(Mutex::new(Some(PendingLogin::new(state))));
    let server_state = Arc::clone(&shared);
    let addr = config::server_addr();
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(&addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    let Some(query) = wait_for_callback(shared).await else {
        server.abort();
        error!("Authentication failed or timed out.");
    };

    let mut location = match Url::parse(&client.credentials().redirect_uri) {
        Ok(url) => url,
        Err(e) => {
            server.abort();
            error!("Invalid redirect URI: {}", e);
        }
    };
    location.set_query(Some(&query));

    let mut session = AuthSession::new(FileStore::default_location());
    session.initialize(&mut location, &client).await;
    server.abort();

    if session.is_authenticated() {
        let name = session
            .user()
            .and_then(|u| u.display_name.clone())
            .unwrap_or_else(|| "User".to_string());
        success!("Welcome, {}!", name);
    } else {
        error!("Authentication failed.");
    }
}

pub async fn logout() {
    let mut session = AuthSession::new(FileStore::default_location());
    session.logout().await;
}

pub async fn status() {
    let mut session = AuthSession::new(FileStore::default_location());
    session.restore().await;

    if !session.is_authenticated() {
        info!("Not signed in. Run moodplay login.");
        return;
    }

    match session.user() {
        Some(user) => success!(
            "Signed in as {} ({})",
            user.display_name.as_deref().unwrap_or("User"),
            user.email.as_deref().unwrap_or("no email")
        ),
        None => success!("Signed in."),
    }
}

/// Polls for the redirect query captured by the callback server.
async fn wait_for_callback(shared: SharedLogin) -> Option<String> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Spotify authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = tokio::time::Instant::now();
    while start.elapsed() < LOGIN_TIMEOUT {
        let query = shared
            .lock()
            .await
            .as_ref()
            .and_then(|login| login.query.clone());
        if query.is_some() {
            pb.finish_and_clear();
            return query;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    pb.finish_and_clear();
    None
}
