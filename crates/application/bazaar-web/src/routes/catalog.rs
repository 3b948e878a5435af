use std::sync::Arc;

use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use bazaar_catalog::ProductQuery;
use bazaar_core::Listing;
use bazaar_favorites::FavoriteStatus;
use serde_json::json;

use crate::routes::is_htmx;
use crate::templates::catalog::{browse_html, listing_detail_html, product_grid};
use crate::{AppError, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(browse))
        .route("/listings/:id", get(listing_detail))
        .route("/api/products", get(api_products))
        .route("/api/products/:id", get(api_product))
        .route("/api/categories", get(api_categories))
}

/// Pair each listing with its favorite status under one read lock
fn with_status<'a>(
    state: &AppState,
    listings: Vec<&'a Listing>,
) -> Result<Vec<(&'a Listing, FavoriteStatus)>, AppError> {
    let favorites = state.favorites()?;
    Ok(listings
        .into_iter()
        .map(|l| (l, favorites.status(&l.id)))
        .collect())
}

async fn browse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let next = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let products = with_status(&state, state.catalog.products(&query))?;
    tracing::debug!(
        q = query.query.as_deref().unwrap_or_default(),
        category = query.active_category().unwrap_or("all"),
        results = products.len(),
        "Browse"
    );

    if is_htmx(&headers) {
        return Ok(Html(product_grid(&products, &next)));
    }
    Ok(Html(browse_html(
        &query,
        &state.catalog.categories(),
        &products,
        &next,
    )))
}

async fn listing_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let listing = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFoundPage(format!("/listings/{id}")))?;
    let status = state.favorites()?.status(&listing.id);
    Ok(Html(listing_detail_html(listing, status)))
}

async fn api_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Response {
    let products = state.catalog.products(&query);
    Json(json!({
        "count": products.len(),
        "products": products,
    }))
    .into_response()
}

async fn api_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, AppError> {
    Ok(Json(state.catalog.find(&id)?.clone()))
}

async fn api_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.categories())
}
