//! Turning model output into a keyword list

use crate::{Result, SuggestError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Answer {
    suggested_keywords: Vec<Value>,
}

/// Pull the JSON payload out of a model answer, tolerating a fenced code
/// block or prose around it
fn json_slice(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let end = text.rfind(['}', ']'])?;
    (end >= start).then(|| &text[start..=end])
}

/// Parse `{"suggestedKeywords": [...]}` or a bare array of strings.
///
/// Anything else in the object (such as suggested categories) is dropped.
/// Keywords are trimmed; blanks and exact duplicates are removed.
pub fn parse_keywords(text: &str) -> Result<Vec<String>> {
    let slice = json_slice(text)
        .ok_or_else(|| SuggestError::Malformed("no JSON in answer".to_string()))?;
    let value: Value =
        serde_json::from_str(slice).map_err(|e| SuggestError::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => {
            serde_json::from_value::<Answer>(object)
                .map_err(|e| SuggestError::Malformed(e.to_string()))?
                .suggested_keywords
        }
        other => {
            return Err(SuggestError::Malformed(format!("unexpected JSON: {other}")));
        }
    };

    let mut keywords: Vec<String> = Vec::new();
    for item in items {
        let Value::String(keyword) = item else {
            return Err(SuggestError::Malformed("keyword is not a string".to_string()));
        };
        let keyword = keyword.trim();
        if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    Ok(keywords)
}
