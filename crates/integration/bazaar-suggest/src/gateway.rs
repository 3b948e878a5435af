//! Fail-soft front of the suggestion provider

use crate::provider::KeywordSuggester;
use crate::types::{SuggestResponse, SuggestionRequest};
use std::sync::Arc;

#[derive(Clone)]
pub struct SuggestionGateway {
    provider: Arc<dyn KeywordSuggester>,
}

impl SuggestionGateway {
    pub fn new(provider: Arc<dyn KeywordSuggester>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the provider. Any error becomes a failure response; nothing
    /// propagates to the caller.
    pub async fn suggest(&self, request: &SuggestionRequest) -> SuggestResponse {
        match self.provider.suggest(request).await {
            Ok(keywords) => SuggestResponse::ok(keywords),
            Err(e) => {
                tracing::warn!(provider = self.provider.name(), "AI suggestion failed: {}", e);
                SuggestResponse::failed()
            }
        }
    }
}

impl std::fmt::Debug for SuggestionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionGateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, SuggestError};
    use async_trait::async_trait;

    struct FixedSuggester(Vec<&'static str>);

    #[async_trait]
    impl KeywordSuggester for FixedSuggester {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|k| k.to_string()).collect())
        }
    }

    struct BrokenSuggester;

    #[async_trait]
    impl KeywordSuggester for BrokenSuggester {
        fn name(&self) -> &str {
            "broken"
        }

        async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<String>> {
            Err(SuggestError::Malformed("garbage".to_string()))
        }
    }

    #[tokio::test]
    async fn test_success_passes_keywords() {
        let gateway = SuggestionGateway::new(Arc::new(FixedSuggester(vec!["sofa", "leather"])));
        let response = gateway
            .suggest(&SuggestionRequest::new("Sofa", "Leather sofa"))
            .await;
        assert!(response.success);
        assert_eq!(response.keywords(), ["sofa", "leather"]);
    }

    #[tokio::test]
    async fn test_failure_is_soft() {
        let gateway = SuggestionGateway::new(Arc::new(BrokenSuggester));
        let response = gateway
            .suggest(&SuggestionRequest::new("Sofa", "Leather sofa"))
            .await;
        assert_eq!(response, SuggestResponse::failed());
    }
}
