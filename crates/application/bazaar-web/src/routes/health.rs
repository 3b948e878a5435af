use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::templates::STYLE_CSS;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(api_health))
        .route("/static/style.css", get(style_css))
}

async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let favorites_loaded = state
        .favorites()
        .map(|f| f.is_loaded())
        .unwrap_or(false);

    Json(json!({
        "status": "ok",
        "listings": state.catalog.len(),
        "favorites_loaded": favorites_loaded,
        "drafts": state.drafts.len(),
        "suggest_provider": state.suggest.provider_name(),
        "uptime_secs": state.uptime_secs(),
    }))
}

async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
