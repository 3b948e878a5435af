//! Suggestion panel state next to the listing form
//!
//! `begin` and `finish` bracket one request. While a request is out the
//! trigger is disabled and a second `begin` is refused. Responses are
//! applied when they arrive, even if the title or description changed in
//! the meantime.

use crate::types::{Notice, SuggestResponse, SuggestionRequest};
use crate::{Result, SuggestError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    in_flight: bool,
    keywords: Vec<String>,
    notice: Option<Notice>,
}

impl SuggestionPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger disabled while a request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Keywords on offer, each accepted individually by the seller
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    /// Start a request for the current draft text.
    ///
    /// Blank input is refused with a notice and no remote call; a second
    /// request while one is outstanding is refused outright.
    pub fn begin(&mut self, title: &str, description: &str) -> Result<SuggestionRequest> {
        if self.in_flight {
            return Err(SuggestError::InFlight);
        }
        let request = SuggestionRequest::new(title, description);
        if !request.is_complete() {
            self.notice = Some(Notice::missing_input());
            return Err(SuggestError::MissingInput);
        }
        self.in_flight = true;
        self.keywords.clear();
        self.notice = None;
        Ok(request)
    }

    /// Apply the gateway's answer and re-enable the trigger
    pub fn finish(&mut self, response: &SuggestResponse) {
        self.in_flight = false;
        if response.success {
            self.keywords = response.keywords().to_vec();
        } else {
            self.notice = Some(Notice::failed(response.error.as_deref()));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_refused_locally() {
        let mut panel = SuggestionPanel::new();
        assert!(matches!(panel.begin("Sofa", " "), Err(SuggestError::MissingInput)));
        assert_eq!(panel.notice().unwrap().title, "Title and Description needed");
        assert!(!panel.is_busy());
    }

    #[test]
    fn test_duplicate_request_refused() {
        let mut panel = SuggestionPanel::new();
        panel.begin("Sofa", "Leather sofa").unwrap();
        assert!(panel.is_busy());
        assert!(matches!(panel.begin("Sofa", "Leather sofa"), Err(SuggestError::InFlight)));

        panel.finish(&SuggestResponse::ok(vec!["sofa".into()]));
        assert!(!panel.is_busy());
        assert_eq!(panel.keywords(), ["sofa"]);
    }

    #[test]
    fn test_failure_keeps_panel_usable() {
        let mut panel = SuggestionPanel::new();
        panel.begin("Sofa", "Leather sofa").unwrap();
        panel.finish(&SuggestResponse::failed());

        let notice = panel.notice().unwrap();
        assert_eq!(notice.title, "Suggestion Failed");
        assert_eq!(notice.description, "Failed to get AI suggestions.");
        assert!(panel.keywords().is_empty());

        panel.dismiss();
        assert!(panel.begin("Sofa", "Leather sofa").is_ok());
    }
}
