use axum::response::Html;

pub async fn home() -> Html<&'static str> {
    Html("<h2>Mood Music</h2><p>You can close this window and return to the terminal.</p>")
}
