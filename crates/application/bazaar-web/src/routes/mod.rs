pub mod catalog;
pub mod favorites;
pub mod health;
pub mod sell;
pub mod suggest;

use axum::http::{HeaderMap, Uri};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::AppError;

/// Cookie naming the browser's sell draft
pub const DRAFT_COOKIE: &str = "bazaar_draft";

/// Check if the request comes from HTMX (has HX-Request header).
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Draft id from the cookie, issuing a fresh one when absent or garbled.
pub fn draft_id(cookies: &Cookies) -> Uuid {
    if let Some(id) = cookies
        .get(DRAFT_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        return id;
    }

    let id = Uuid::new_v4();
    let mut cookie = Cookie::new(DRAFT_COOKIE, id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookies.add(cookie);
    tracing::debug!(draft = %id, "Issued draft cookie");
    id
}

/// Only same-site absolute paths are followed after a form post
pub fn safe_redirect(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

/// Fallback: JSON under `/api`, the not-found page elsewhere
pub async fn not_found(uri: Uri) -> AppError {
    if uri.path().starts_with("/api/") {
        AppError::NotFound(uri.path().to_string())
    } else {
        AppError::NotFoundPage(uri.path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/favorites")), "/favorites");
        assert_eq!(safe_redirect(Some("//evil.example")), "/");
        assert_eq!(safe_redirect(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect(None), "/");
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", "true".parse().unwrap());
        assert!(is_htmx(&headers));
    }
}
