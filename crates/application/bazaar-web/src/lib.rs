//! # Bazaar Web
//!
//! Server-rendered storefront plus a JSON API.
//!
//! - `/` browse with search and category filter, `/listings/:id` detail
//! - `/favorites` liked listings, toggled from any card
//! - `/sell` the wizard; its step comes from the query string alone, the
//!   transient form state lives in a per-browser draft keyed by the
//!   `bazaar_draft` cookie
//! - `/api/*` JSON for the same operations (HTMX requests get fragments)

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod templates;

use axum::Router;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppState, Draft, DraftStore};

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::catalog::router())
        .merge(routes::favorites::router())
        .merge(routes::sell::router())
        .merge(routes::suggest::router())
        .fallback(routes::not_found)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Bazaar listening on http://{}", addr);

    axum::serve(listener, app).await
}
