//! Sell wizard
//!
//! `GET /sell` derives the step from the query string and renders it. The
//! form posts carry the same parameters as hidden inputs, so a post always
//! acts on the step the seller was looking at, even from a stale tab.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use bazaar_core::{DetailKind, ValidationErrors};
use bazaar_wizard::params::{CATEGORY, DETAILS_SUBMITTED, SELL_PATH, SUBCATEGORY};
use bazaar_wizard::{apply, Action, PhotoGallery, Step, Wizard, WizardError, WizardParams};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::Cookies;

use crate::extract::JsonOrForm;
use crate::routes::{draft_id, is_htmx};
use crate::templates::sell::{
    category_list_html, detail_form_html, gallery_html, keywords_field_html, listing_form_html,
    sell_page, subcategory_list_html, submitted_html, ListingView,
};
use crate::{AppError, AppState, Draft};

/// Textarea of newline separated photo URLs on photo-bearing forms
const PHOTO_URLS: &str = "photo_urls";

const NON_FIELD_KEYS: &[&str] = &[CATEGORY, SUBCATEGORY, DETAILS_SUBMITTED, PHOTO_URLS];

type Pairs = Vec<(String, String)>;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sell", get(sell))
        .route("/sell/details", post(submit_details))
        .route("/sell/submit", post(submit_listing))
        .route("/api/sell/details", post(api_update_details))
        .route("/api/sell/keywords", post(api_accept_keyword))
        .route("/api/sell/photos", post(api_upload_photos))
        .route("/api/sell/photos/reorder", post(api_reorder_photos))
        .route("/api/sell/photos/cover", post(api_set_cover))
        .route("/api/sell/photos/remove", post(api_remove_photo))
}

fn params_of(pairs: &[(String, String)]) -> WizardParams {
    WizardParams::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

fn back_href(params: &WizardParams) -> String {
    apply(params, &Action::Back)
        .map(|p| p.href())
        .unwrap_or_else(|_| SELL_PATH.to_string())
}

/// Full page for the draft's current step
fn render_step(draft: &Draft, errors: Option<&ValidationErrors>) -> String {
    let wizard = &draft.wizard;
    let step = wizard.step();
    let back = back_href(wizard.params());

    let content = match step {
        Step::ChoosingCategory => category_list_html(),
        Step::ChoosingSubcategory { category } => subcategory_list_html(category),
        Step::CategoryDetailForm { .. } => match wizard.detail_form() {
            Some(form) => {
                let errors = errors.cloned().unwrap_or_else(|| form.active_errors());
                detail_form_html(wizard.params(), form, &errors, &back)
            }
            None => category_list_html(),
        },
        Step::ListingSubmission { kind, .. } => {
            let none = ValidationErrors::new();
            listing_form_html(&ListingView {
                params: wizard.params(),
                form: wizard.sell_form(),
                details: wizard.details(),
                extras: (kind == DetailKind::Generic).then(|| wizard.generic_form()),
                panel: &draft.panel,
                errors: errors.unwrap_or(&none),
                back: &back,
            })
        }
    };
    sell_page(&step, &content)
}

/// Detail form to return to when the listing step was reached without it
fn missing_details_redirect(wizard: &Wizard) -> Option<Response> {
    if !wizard.details_missing() {
        return None;
    }
    tracing::debug!(step = wizard.step().name(), "Category details missing, back to the form");
    Some(Redirect::to(&back_href(wizard.params())).into_response())
}

async fn sell(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let params = WizardParams::from_query(query.as_deref().unwrap_or_default());

    state.drafts.with(id, |draft| {
        let step = draft.wizard.navigate(&params);
        if let Some(redirect) = missing_details_redirect(&draft.wizard) {
            return redirect;
        }
        if !matches!(step, Step::ListingSubmission { .. }) {
            draft.panel.reset();
        }
        tracing::debug!(draft = %id, step = step.name(), "Sell step");
        Html(render_step(draft, None)).into_response()
    })
}

/// Copy posted values into the active detail form and take any new photos
fn fill_detail_form(wizard: &mut Wizard, pairs: &[(String, String)]) -> Result<(), WizardError> {
    let form = wizard.detail_form_mut()?;
    form.fill(
        pairs
            .iter()
            .filter(|(k, _)| !NON_FIELD_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );

    let urls: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == PHOTO_URLS)
        .flat_map(|(_, v)| v.lines())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .collect();
    if !urls.is_empty() {
        let added = form.photos_mut()?.upload(urls);
        tracing::debug!(added, "Photos added from form");
    }
    Ok(())
}

async fn submit_details(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(pairs): Form<Pairs>,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let params = params_of(&pairs);

    state.drafts.with(id, |draft| -> Result<Response, AppError> {
        draft.wizard.navigate(&params);
        fill_detail_form(&mut draft.wizard, &pairs)?;
        match draft.wizard.dispatch(&Action::SubmitDetails) {
            Ok(_) => Ok(Redirect::to(&draft.wizard.params().href()).into_response()),
            Err(WizardError::Validation(errors)) => Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_step(draft, Some(&errors))),
            )
                .into_response()),
            Err(e) => Err(e.into()),
        }
    })?
}

/// Live revalidation while the detail form is edited
async fn api_update_details(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(values): JsonOrForm<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let pairs: Pairs = values.into_iter().collect();
    let params = params_of(&pairs);
    let htmx = is_htmx(&headers);

    state.drafts.with(id, |draft| -> Result<Response, AppError> {
        draft.wizard.navigate(&params);
        fill_detail_form(&mut draft.wizard, &pairs)?;
        let form = draft.wizard.detail_form().ok_or(WizardError::NoDetailForm)?;
        let errors = form.active_errors();

        if htmx {
            let back = back_href(draft.wizard.params());
            return Ok(Html(detail_form_html(draft.wizard.params(), form, &errors, &back)).into_response());
        }
        Ok(Json(json!({
            "canSubmit": form.can_submit(),
            "missing": form.fields().missing_required(),
            "errors": errors,
        }))
        .into_response())
    })?
}

/// Copy posted listing fields into the draft; generic extras ride along
fn fill_listing_form(wizard: &mut Wizard, pairs: &[(String, String)]) {
    let form = wizard.sell_form_mut();
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "title" => &mut form.title,
            "description" => &mut form.description,
            "price" => &mut form.price,
            "keywords" => &mut form.keywords,
            "location" => &mut form.location,
            "contact" => &mut form.contact,
            _ => continue,
        };
        slot.clone_from(value);
    }

    if let Step::ListingSubmission { kind: DetailKind::Generic, .. } = wizard.step() {
        let extras: Vec<(&str, &str)> = pairs
            .iter()
            .filter(|(k, _)| wizard.generic_form().fields().spec(k).is_some())
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        wizard.generic_form_mut().fill(extras);
    }
}

async fn submit_listing(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Form(pairs): Form<Pairs>,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let params = params_of(&pairs);
    let sink = Arc::clone(&state.sink);

    state.drafts.with(id, |draft| -> Result<Response, AppError> {
        draft.wizard.navigate(&params);
        fill_listing_form(&mut draft.wizard, &pairs);
        match draft.wizard.submit_listing(sink.as_ref()) {
            Ok(receipt) => {
                draft.panel.reset();
                Ok(Html(submitted_html(&receipt)).into_response())
            }
            Err(WizardError::Validation(errors)) => Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_step(draft, Some(&errors))),
            )
                .into_response()),
            Err(WizardError::NoDetailForm) => missing_details_redirect(&draft.wizard)
                .ok_or_else(|| WizardError::NoDetailForm.into()),
            Err(e) => Err(e.into()),
        }
    })?
}

#[derive(Debug, Deserialize)]
struct KeywordRequest {
    keyword: String,
    /// Current text of the keyword field, when posted with the form
    #[serde(default)]
    keywords: Option<String>,
}

async fn api_accept_keyword(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(req): JsonOrForm<KeywordRequest>,
) -> Result<Response, AppError> {
    let id = draft_id(&cookies);
    let keywords = state.drafts.with(id, |draft| {
        if let Some(current) = req.keywords {
            draft.wizard.sell_form_mut().keywords = current;
        }
        draft.wizard.accept_keyword(&req.keyword)
    })?;

    if is_htmx(&headers) {
        return Ok(Html(keywords_field_html(&keywords, None)).into_response());
    }
    Ok(Json(json!({ "keywords": keywords })).into_response())
}

/// Run `op` on the active form's gallery and answer with the new state
fn gallery_op(
    state: &AppState,
    cookies: &Cookies,
    headers: &HeaderMap,
    op: impl FnOnce(&mut PhotoGallery) -> Result<(), WizardError>,
) -> Result<Response, AppError> {
    let id = draft_id(cookies);
    let htmx = is_htmx(headers);

    state.drafts.with(id, |draft| -> Result<Response, AppError> {
        let gallery = draft.wizard.detail_form_mut()?.photos_mut()?;
        op(&mut *gallery)?;
        if htmx {
            Ok(Html(gallery_html(gallery)).into_response())
        } else {
            Ok(Json(gallery.snapshot()).into_response())
        }
    })?
}

#[derive(Debug, Deserialize)]
struct PhotoUpload {
    #[serde(default)]
    urls: Vec<String>,
    /// Newline separated, as typed into the gallery textarea
    #[serde(default)]
    photo_urls: Option<String>,
}

async fn api_upload_photos(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(req): JsonOrForm<PhotoUpload>,
) -> Result<Response, AppError> {
    let mut urls = req.urls;
    if let Some(text) = req.photo_urls {
        urls.extend(text.lines().map(str::trim).filter(|u| !u.is_empty()).map(String::from));
    }
    gallery_op(&state, &cookies, &headers, |gallery| {
        let offered = urls.len();
        let added = gallery.upload(urls);
        if added < offered {
            tracing::info!(offered, added, "Photo limit reached, extra photos dropped");
        }
        Ok(())
    })
}

#[derive(Debug, Deserialize)]
struct ReorderRequest {
    from: usize,
    to: usize,
}

async fn api_reorder_photos(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(req): JsonOrForm<ReorderRequest>,
) -> Result<Response, AppError> {
    gallery_op(&state, &cookies, &headers, |gallery| gallery.reorder(req.from, req.to))
}

#[derive(Debug, Deserialize)]
struct IndexRequest {
    index: usize,
}

async fn api_set_cover(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(req): JsonOrForm<IndexRequest>,
) -> Result<Response, AppError> {
    gallery_op(&state, &cookies, &headers, |gallery| gallery.set_cover(req.index))
}

async fn api_remove_photo(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    headers: HeaderMap,
    JsonOrForm(req): JsonOrForm<IndexRequest>,
) -> Result<Response, AppError> {
    gallery_op(&state, &cookies, &headers, |gallery| {
        let removed = gallery.remove(req.index)?;
        tracing::debug!(url = %removed.url, "Photo removed");
        Ok(())
    })
}
