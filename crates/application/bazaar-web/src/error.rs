//! HTTP error mapping

use crate::templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use bazaar_catalog::CatalogError;
use bazaar_core::ValidationErrors;
use bazaar_favorites::FavoritesError;
use bazaar_suggest::SuggestError;
use bazaar_wizard::WizardError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// JSON 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rendered "not found" page
    #[error("Page not found: {0}")]
    NotFoundPage(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::NotFoundPage(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFoundPage(what) => {
                (status, Html(templates::not_found_html(&what))).into_response()
            }
            Self::Validation(errors) => (
                status,
                Json(json!({ "error": "validation failed", "fields": errors })),
            )
                .into_response(),
            Self::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                (status, Json(json!({ "error": "internal error" }))).into_response()
            }
            Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Conflict(message)
            | Self::Unprocessable(message) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => Self::NotFound(format!("listing {id}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<FavoritesError> for AppError {
    fn from(e: FavoritesError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::Validation(errors) => Self::Validation(errors),
            WizardError::Core(_)
            | WizardError::UnknownField { .. }
            | WizardError::PhotoIndex { .. } => Self::BadRequest(e.to_string()),
            WizardError::InvalidTransition { .. }
            | WizardError::NoDetailForm
            | WizardError::NoPhotos { .. } => Self::Conflict(e.to_string()),
            WizardError::Sink(_) | WizardError::Serialization(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<SuggestError> for AppError {
    fn from(e: SuggestError) -> Self {
        match e {
            SuggestError::InFlight => Self::Conflict(e.to_string()),
            SuggestError::MissingInput => Self::Unprocessable("Title and Description needed".to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(CatalogError::NotFound("9".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(WizardError::NoDetailForm).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(WizardError::Validation(ValidationErrors::new())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::from(SuggestError::InFlight).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(FavoritesError::NotLoaded).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
