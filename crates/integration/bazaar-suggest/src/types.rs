//! Wire types

use serde::{Deserialize, Serialize};

/// Message shown when the remote call fails for any reason
pub const FAILURE_MESSAGE: &str = "Failed to get AI suggestions.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub title: String,
    pub description: String,
}

impl SuggestionRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields carry text
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Keywords only; categories are never suggested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub suggested_keywords: Vec<String>,
}

/// Fail-soft answer: `data` on success, `error` otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Suggestions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestResponse {
    pub fn ok(keywords: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(Suggestions {
                suggested_keywords: keywords,
            }),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            data: None,
            error: Some(FAILURE_MESSAGE.to_string()),
        }
    }

    pub fn keywords(&self) -> &[String] {
        self.data
            .as_ref()
            .map(|d| d.suggested_keywords.as_slice())
            .unwrap_or(&[])
    }
}

/// A dismissible toast-style message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn missing_input() -> Self {
        Self {
            title: "Title and Description needed".to_string(),
            description: "Please fill in the title and description to get AI suggestions."
                .to_string(),
        }
    }

    pub fn failed(description: Option<&str>) -> Self {
        Self {
            title: "Suggestion Failed".to_string(),
            description: description.unwrap_or(FAILURE_MESSAGE).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let ok = serde_json::to_value(SuggestResponse::ok(vec!["sofa".into()])).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": {"suggestedKeywords": ["sofa"]}}));

        let failed = serde_json::to_value(SuggestResponse::failed()).unwrap();
        assert_eq!(failed, serde_json::json!({"success": false, "error": "Failed to get AI suggestions."}));
        assert!(SuggestResponse::failed().keywords().is_empty());
    }

    #[test]
    fn test_request_completeness() {
        assert!(SuggestionRequest::new("Sofa", "Leather sofa").is_complete());
        assert!(!SuggestionRequest::new("Sofa", "   ").is_complete());
        assert!(!SuggestionRequest::default().is_complete());
    }
}
