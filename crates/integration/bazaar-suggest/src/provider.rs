//! Suggestion providers
//!
//! All providers implement [`KeywordSuggester`]. The production one talks
//! to the Anthropic messages API; [`UnavailableSuggester`] stands in when no
//! API key is configured so the rest of the app keeps working.

use crate::parse::parse_keywords;
use crate::types::SuggestionRequest;
use crate::{Result, SuggestError};
use async_trait::async_trait;
use bazaar_config::SuggestConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You suggest search keywords for classified ads. \
Given the title and description of a listing, suggest relevant keywords that would help buyers find it. \
Never suggest categories, only keywords. \
Answer with JSON only, in the form {\"suggestedKeywords\": [\"...\"]}.";

/// Keyword suggestion capability
#[async_trait]
pub trait KeywordSuggester: Send + Sync {
    /// Provider identifier
    fn name(&self) -> &str;

    /// Keywords for a listing draft
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<String>>;
}

/// Always fails; used when the remote provider is not configured
#[derive(Debug, Clone)]
pub struct UnavailableSuggester {
    reason: String,
}

impl UnavailableSuggester {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl KeywordSuggester for UnavailableSuggester {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<String>> {
        Err(SuggestError::Unavailable(self.reason.clone()))
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ApiMessage>,
}

#[derive(Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Anthropic messages API client
#[derive(Debug, Clone)]
pub struct AnthropicSuggester {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicSuggester {
    /// Build from config, reading the API key from the configured variable
    pub fn from_config(config: &SuggestConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SuggestError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_key(config, api_key)
    }

    pub fn with_key(config: &SuggestConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn prompt(request: &SuggestionRequest) -> String {
        format!(
            "Title: {}\nDescription: {}",
            request.title.trim(),
            request.description.trim()
        )
    }
}

#[async_trait]
impl KeywordSuggester for AnthropicSuggester {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<String>> {
        let body = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![ApiMessage {
                role: "user",
                content: Self::prompt(request),
            }],
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ApiError>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let answer: ApiResponse = resp.json().await?;
        let text = answer
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        let keywords = parse_keywords(&text)?;
        tracing::debug!(count = keywords.len(), model = %self.model, "Keywords suggested");
        Ok(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_always_fails() {
        let provider = UnavailableSuggester::new("no key");
        let err = provider
            .suggest(&SuggestionRequest::new("Sofa", "Leather sofa"))
            .await
            .unwrap_err();
        assert!(matches!(err, SuggestError::Unavailable(_)));
    }

    #[test]
    fn test_missing_key_reported() {
        let config = SuggestConfig {
            api_key_env: "BAZAAR_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..SuggestConfig::default()
        };
        assert!(matches!(
            AnthropicSuggester::from_config(&config),
            Err(SuggestError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_with_key_uses_config() {
        let provider = AnthropicSuggester::with_key(&SuggestConfig::default(), "sk-test").unwrap();
        assert_eq!(provider.model(), SuggestConfig::default().model);
        assert_eq!(provider.name(), "anthropic");
    }

    #[test]
    fn test_prompt_carries_both_fields() {
        let prompt = AnthropicSuggester::prompt(&SuggestionRequest::new(" Guitar ", "Yamaha acoustic"));
        assert_eq!(prompt, "Title: Guitar\nDescription: Yamaha acoustic");
    }
}
