use axum::response::Html;

/// GET /
/// Serves the form page. All interactivity is inline vanilla JS; the page
/// posts to /api/v1/generate and renders the response envelope.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
