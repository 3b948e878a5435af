use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use bazaar_favorites::FavoriteStatus;
use serde::Deserialize;
use serde_json::json;

use crate::routes::{is_htmx, safe_redirect};
use crate::templates::catalog::favorite_button;
use crate::templates::favorites::favorites_html;
use crate::{AppError, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favorites", get(favorites_page))
        .route("/favorites/:id/toggle", post(toggle_form))
        .route("/api/favorites", get(api_favorites))
        .route("/api/favorites/:id/toggle", post(api_toggle))
}

async fn favorites_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let favorites = state.favorites()?;
    let html = match favorites.ids() {
        Some(ids) => {
            let listings = state.catalog.with_ids(ids.iter().map(String::as_str));
            favorites_html(Some(listings.as_slice()))
        }
        None => favorites_html(None),
    };
    Ok(Html(html))
}

/// Flip membership of a catalog listing, returning the new membership
fn toggle(state: &AppState, id: &str) -> Result<(bool, Vec<String>), AppError> {
    state.catalog.find(id)?;
    let mut favorites = state.favorites_mut()?;
    let ids = favorites.toggle(id)?;
    Ok((ids.contains(id), ids.iter().cloned().collect()))
}

#[derive(Debug, Deserialize)]
struct ToggleForm {
    next: Option<String>,
}

async fn toggle_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    toggle(&state, &id)?;
    Ok(Redirect::to(safe_redirect(form.next.as_deref())))
}

async fn api_favorites(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, AppError> {
    let favorites = state.favorites()?;
    Ok(Json(json!({
        "loaded": favorites.is_loaded(),
        "ids": favorites.ids(),
    })))
}

/// JSON for scripts, the swapped button for HTMX
async fn api_toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    form: Option<Form<ToggleForm>>,
) -> Result<Response, AppError> {
    let (favorite, ids) = toggle(&state, &id)?;

    if is_htmx(&headers) {
        let status = if favorite {
            FavoriteStatus::Favorite
        } else {
            FavoriteStatus::NotFavorite
        };
        let next = form.as_ref().and_then(|Form(f)| f.next.as_deref());
        return Ok(Html(favorite_button(&id, status, safe_redirect(next))).into_response());
    }
    Ok(Json(json!({ "id": id, "favorite": favorite, "ids": ids })).into_response())
}
