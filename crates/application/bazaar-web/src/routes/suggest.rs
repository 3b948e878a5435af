use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use bazaar_suggest::SuggestError;
use serde::Deserialize;
use serde_json::json;
use tower_cookies::Cookies;

use crate::extract::JsonOrForm;
use crate::routes::{draft_id, is_htmx};
use crate::templates::sell::suggestion_panel_html;
use crate::{AppError, AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/suggest", post(api_suggest))
        .route("/api/suggest/dismiss", post(api_dismiss))
}

#[derive(Debug, Deserialize)]
struct SuggestForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Keyword suggestions for the listing draft.
///
/// The panel is marked busy before the remote call and released after it;
/// the draft lock is never held across the call.
async fn api_suggest(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(form): JsonOrForm<SuggestForm>,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let htmx = is_htmx(&headers);

    let begun = state
        .drafts
        .with(id, |draft| draft.panel.begin(&form.title, &form.description))?;
    let request = match begun {
        Ok(request) => request,
        Err(SuggestError::MissingInput) if htmx => {
            let html = state
                .drafts
                .with(id, |draft| suggestion_panel_html(&draft.panel))?;
            return Ok(Html(html).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    // finish in a task of its own so a dropped connection cannot leave the panel busy
    let task_state = Arc::clone(&state);
    let (response, html) = tokio::spawn(async move {
        let response = task_state.suggest.suggest(&request).await;
        let html = task_state.drafts.with(id, |draft| {
            draft.panel.finish(&response);
            suggestion_panel_html(&draft.panel)
        });
        (response, html)
    })
    .await
    .map_err(|e| AppError::Internal(format!("suggestion task failed: {e}")))?;

    if htmx {
        return Ok(Html(html?).into_response());
    }
    Ok(Json(response).into_response())
}

async fn api_dismiss(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let html = state.drafts.with(id, |draft| {
        draft.panel.dismiss();
        suggestion_panel_html(&draft.panel)
    })?;

    if is_htmx(&headers) {
        return Ok(Html(html).into_response());
    }
    Ok(Json(json!({ "dismissed": true })).into_response())
}
