//! # Bazaar Suggest
//!
//! Keyword suggestions for a listing draft, from an external text model.
//!
//! ```text
//!   SuggestionPanel ──begin──► SuggestionGateway ──► KeywordSuggester
//!        ▲                          │                 (Anthropic / mock)
//!        └────────finish────────────┘
//!              SuggestResponse { success, data | error }
//! ```
//!
//! The gateway never fails: provider errors and unusable answers become a
//! failure response with a generic message. The panel refuses blank input
//! and duplicate in-flight requests locally, and never applies a keyword on
//! its own; accepting one is the caller's move.

pub mod gateway;
pub mod panel;
pub mod parse;
pub mod provider;
pub mod types;

pub use gateway::SuggestionGateway;
pub use panel::SuggestionPanel;
pub use parse::parse_keywords;
pub use provider::{AnthropicSuggester, KeywordSuggester, UnavailableSuggester};
pub use types::{Notice, SuggestResponse, SuggestionRequest, Suggestions};

/// Result type for bazaar-suggest operations
pub type Result<T> = std::result::Result<T, SuggestError>;

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("Title and description are required")]
    MissingInput,

    #[error("A suggestion request is already in flight")]
    InFlight,

    #[error("API key not set: export {0}")]
    MissingApiKey(String),

    #[error("Suggestion provider unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed suggestion response: {0}")]
    Malformed(String),
}
