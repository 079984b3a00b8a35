mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use moodplay::{
    Error,
    spotify::{
        auth::generate_state,
        recommendations::{
            MOOD_SONGS_LIMIT, PLACEHOLDER_COVER, format_duration, mood_params, normalize_track,
            recommendation_query,
        },
    },
    types::{Image, RemoteAlbum, RemoteArtist, RemoteTrack, SongSource},
};
use serde_json::{Value, json};

use common::{client_for, serve};

type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn remote_track(id: &str, images: Vec<Image>) -> RemoteTrack {
    RemoteTrack {
        id: id.to_string(),
        name: format!("Track {}", id),
        artists: vec![
            RemoteArtist {
                name: "First".to_string(),
            },
            RemoteArtist {
                name: "Second".to_string(),
            },
        ],
        album: RemoteAlbum { images },
        preview_url: Some(format!("https://p.scdn.co/{}.mp3", id)),
        duration_ms: 125_000,
        uri: format!("spotify:track:{}", id),
    }
}

fn tracks_json() -> Value {
    json!({
        "tracks": [
            {
                "id": "t1",
                "name": "Sunrise",
                "artists": [{ "name": "Alpha" }],
                "album": { "images": [{ "url": "https://i.scdn.co/t1.jpg" }] },
                "preview_url": null,
                "duration_ms": 200_000,
                "uri": "spotify:track:t1"
            },
            {
                "id": "t2",
                "name": "Noon",
                "artists": [{ "name": "Beta" }, { "name": "Gamma" }],
                "album": { "images": [] },
                "preview_url": "https://p.scdn.co/t2.mp3",
                "duration_ms": 61_000,
                "uri": "spotify:track:t2"
            }
        ]
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Fake Spotify that answers recommendations for `user-token` and records
/// every query it receives.
fn recommendations_router(captured: Captured, body: Value) -> Router {
    Router::new().route(
        "/v1/recommendations",
        get(
            move |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                captured.lock().unwrap().push(query);
                if bearer(&headers).as_deref() != Some("user-token") {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                Json(body).into_response()
            },
        ),
    )
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(125_000), "2:05");
    assert_eq!(format_duration(59_999), "0:59");
    assert_eq!(format_duration(600_000), "10:00");
}

#[test]
fn test_normalize_track() {
    let song = normalize_track(
        remote_track(
            "abc",
            vec![
                Image {
                    url: "https://i.scdn.co/big.jpg".to_string(),
                },
                Image {
                    url: "https://i.scdn.co/small.jpg".to_string(),
                },
            ],
        ),
        "sad",
    );

    assert_eq!(song.id, "abc");
    assert_eq!(song.title, "Track abc");
    assert_eq!(song.artist, "First, Second");
    assert_eq!(song.cover_url, "https://i.scdn.co/big.jpg");
    assert_eq!(song.duration, "2:05");
    assert_eq!(song.moods, vec!["sad".to_string()]);
    assert_eq!(song.source, SongSource::Remote);
    assert_eq!(song.uri.as_deref(), Some("spotify:track:abc"));
    assert!(song.energy.is_none() && song.tempo.is_none());
}

#[test]
fn test_normalize_track_without_cover_uses_placeholder() {
    let song = normalize_track(remote_track("x", Vec::new()), "happy");
    assert_eq!(song.cover_url, PLACEHOLDER_COVER);
}

#[test]
fn test_mood_params_fall_back_to_happy() {
    let happy = mood_params("happy");
    assert_eq!(mood_params("love"), happy);
    assert_eq!(mood_params("grumpy"), happy);
    assert_eq!(mood_params("sad").seed_genres, "sad,blues,indie");
    assert_eq!(mood_params("focused").seed_genres, "study,classical,instrumental");
}

#[test]
fn test_recommendation_query() {
    let query: HashMap<&str, String> = recommendation_query("energetic", 15).into_iter().collect();
    assert_eq!(query["limit"], "15");
    assert_eq!(query["seed_genres"], "dance,electronic,workout");
    assert_eq!(query["target_energy"], "0.9");
    assert_eq!(query["target_tempo"], "130");
    assert_eq!(query["min_energy"], "0.7");
    assert_eq!(query.len(), 5);
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_authorize_url() {
    let client = client_for("https://accounts.example.com");
    let url = client.authorize_url("nonce123").unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/authorize");
    assert_eq!(params["client_id"], "test-client");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:8888/callback");
    assert_eq!(params["state"], "nonce123");
    assert!(params["scope"].contains("user-read-private"));
}

#[tokio::test]
async fn test_recommend_normalizes_tracks() {
    let captured = Captured::default();
    let base = serve(recommendations_router(captured.clone(), tracks_json())).await;
    let client = client_for(&base);

    let songs = client.recommend("relaxed", "user-token", 2).await;

    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0].title, "Sunrise");
    assert_eq!(songs[0].duration, "3:20");
    assert_eq!(songs[0].audio_url, None);
    assert_eq!(songs[1].artist, "Beta, Gamma");
    assert_eq!(songs[1].cover_url, PLACEHOLDER_COVER);
    assert!(songs.iter().all(|s| s.moods == vec!["relaxed".to_string()]));

    let query = &captured.lock().unwrap()[0];
    assert_eq!(query["limit"], "2");
    assert_eq!(query["seed_genres"], "chill,ambient,sleep");
    assert_eq!(query["max_energy"], "0.4");
}

#[tokio::test]
async fn test_recommend_soft_fails_on_error_status() {
    let router = Router::new().route(
        "/v1/recommendations",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(&serve(router).await);

    assert!(client.recommend("happy", "user-token", 15).await.is_empty());

    match client.try_recommend("happy", "user-token", 15).await {
        Err(Error::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other.map(|s| s.len())),
    }
}

#[tokio::test]
async fn test_recommend_without_tracks_field_is_empty() {
    let captured = Captured::default();
    let base = serve(recommendations_router(captured, json!({ "seeds": [] }))).await;
    let songs = client_for(&base)
        .try_recommend("sad", "user-token", 5)
        .await
        .unwrap();
    assert!(songs.is_empty());
}

#[tokio::test]
async fn test_recommend_retries_once_after_rate_limit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/v1/recommendations",
        get(move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")]).into_response()
            } else {
                Json(tracks_json()).into_response()
            }
        }),
    );
    let client = client_for(&serve(router).await);

    let songs = client.recommend("happy", "user-token", 2).await;
    assert_eq!(songs.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rate_limit_with_long_wait_gives_up() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/v1/recommendations",
        get(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "3600")]).into_response()
        }),
    );
    let client = client_for(&serve(router).await);

    assert!(client.recommend("happy", "user-token", 2).await.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_exchange_code_posts_authorization_code_grant() {
    let router = Router::new().route(
        "/api/token",
        post(|Form(form): Form<HashMap<String, String>>| async move {
            if form.get("grant_type").map(String::as_str) != Some("authorization_code")
                || form.get("code").map(String::as_str) != Some("abc")
                || form.get("client_secret").map(String::as_str) != Some("test-secret")
                || form.get("redirect_uri").map(String::as_str)
                    != Some("http://127.0.0.1:8888/callback")
            {
                return StatusCode::BAD_REQUEST.into_response();
            }
            Json(json!({
                "access_token": "user-token",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "refresh"
            }))
            .into_response()
        }),
    );
    let client = client_for(&serve(router).await);

    let token = client.exchange_code("abc").await.unwrap();
    assert_eq!(token.access_token, "user-token");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh"));

    assert!(matches!(
        client.exchange_code("used").await,
        Err(Error::Status { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_client_credentials_uses_basic_auth() {
    let router = Router::new().route(
        "/api/token",
        post(
            |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
                // base64("test-client:test-secret")
                let expected = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some(expected);
                if !authorized
                    || form.get("grant_type").map(String::as_str) != Some("client_credentials")
                {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                Json(json!({ "access_token": "app-token" })).into_response()
            },
        ),
    );
    let client = client_for(&serve(router).await);

    let token = client.client_credentials_token().await.unwrap();
    assert_eq!(token.access_token, "app-token");
    assert_eq!(token.token_type, "");
}

#[tokio::test]
async fn test_mood_songs_uses_application_token() {
    let router = Router::new()
        .route(
            "/api/token",
            post(|| async { Json(json!({ "access_token": "app-token" })) }),
        )
        .route(
            "/v1/recommendations",
            get(
                |headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
                    if bearer(&headers).as_deref() != Some("app-token") {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    assert_eq!(query["limit"], MOOD_SONGS_LIMIT.to_string());
                    Json(tracks_json()).into_response()
                },
            ),
        );
    let client = client_for(&serve(router).await);

    let songs = client.mood_songs("focused", MOOD_SONGS_LIMIT).await;
    assert_eq!(songs.len(), 2);
    assert!(songs.iter().all(|s| s.moods == vec!["focused".to_string()]));
}

#[tokio::test]
async fn test_mood_songs_soft_fails_without_token() {
    let router = Router::new().route(
        "/api/token",
        post(|| async { StatusCode::UNAUTHORIZED }),
    );
    let client = client_for(&serve(router).await);
    assert!(client.mood_songs("happy", 5).await.is_empty());
}

#[tokio::test]
async fn test_user_profile() {
    let router = Router::new().route(
        "/v1/me",
        get(|headers: HeaderMap| async move {
            if bearer(&headers).as_deref() != Some("user-token") {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            Json(json!({
                "id": "listener",
                "display_name": "Listener",
                "email": "listener@example.com",
                "images": [{ "url": "https://i.scdn.co/me.jpg", "height": 64 }],
                "country": "DE"
            }))
            .into_response()
        }),
    );
    let client = client_for(&serve(router).await);

    let profile = client.user_profile("user-token").await.unwrap();
    assert_eq!(profile.id, "listener");
    assert_eq!(profile.display_name.as_deref(), Some("Listener"));
    assert_eq!(profile.images[0].url, "https://i.scdn.co/me.jpg");

    assert!(client.user_profile("stale").await.is_err());
}

#[tokio::test]
async fn test_play_track_sends_uri() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = captured.clone();
    let router = Router::new().route(
        "/v1/me/player/play",
        put(move |Json(body): Json<Value>| async move {
            *sink.lock().unwrap() = Some(body);
            StatusCode::NO_CONTENT
        }),
    );
    let client = client_for(&serve(router).await);

    client
        .try_play_track("spotify:track:t1", "user-token")
        .await
        .unwrap();
    assert_eq!(
        captured.lock().unwrap().clone(),
        Some(json!({ "uris": ["spotify:track:t1"] }))
    );
}

#[tokio::test]
async fn test_play_track_failure_is_not_fatal() {
    let router = Router::new().route(
        "/v1/me/player/play",
        put(|| async { (StatusCode::NOT_FOUND, "no active device") }),
    );
    let client = client_for(&serve(router).await);

    client.play_track("spotify:track:t1", "user-token").await;
    assert!(client.try_play_track("spotify:track:t1", "user-token").await.is_err());
}
