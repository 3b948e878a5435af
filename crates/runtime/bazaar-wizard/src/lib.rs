//! # Bazaar Wizard
//!
//! The "sell an item" flow as an explicit state machine.
//!
//! ```text
//!   ChoosingCategory
//!        │ select category
//!        ├──────────────► ChoosingSubcategory ──select──┐
//!        │ (no subcategories)                           │
//!        ▼                                              ▼
//!   CategoryDetailForm ◄── dedicated flow? ─────────────┤
//!        │ submit details                               │ otherwise
//!        ▼                                              ▼
//!   ListingSubmission ◄─────────────────────────────────┘
//! ```
//!
//! The step is never stored. It is re-derived from [`WizardParams`]
//! (`category`, `subcategory`, `details_submitted`) on every request, so
//! back/forward navigation always lands on the same step.
//! [`transition::apply`] maps `(params, action) -> params`.
//!
//! Transient per-session state (the active detail form, the submitted
//! detail object, the listing draft) lives in a [`Wizard`].

pub mod forms;
pub mod params;
pub mod photos;
pub mod session;
pub mod step;
pub mod submission;
pub mod transition;

pub use forms::{CategoryDetails, DetailForm, FieldKind, FieldSet, FieldSpec, INDIAN_STATES};
pub use params::WizardParams;
pub use photos::{PhotoGallery, PhotoId, MAX_PHOTOS};
pub use session::Wizard;
pub use step::{derive_step, Step};
pub use submission::{
    ListingRecord, ListingSink, LogSink, MemorySink, SellForm, SubmissionReceipt,
};
pub use transition::{apply, Action};

use bazaar_core::{DetailKind, ValidationErrors};

/// Result type for bazaar-wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Core(#[from] bazaar_core::Error),

    #[error("{action} is not possible while {step}")]
    InvalidTransition { action: &'static str, step: String },

    #[error("No category detail form is active")]
    NoDetailForm,

    #[error("{kind} form has no field '{field}'")]
    UnknownField { kind: DetailKind, field: String },

    #[error("{kind} form does not take photos")]
    NoPhotos { kind: DetailKind },

    #[error("Photo index {index} out of range ({len} photos)")]
    PhotoIndex { index: usize, len: usize },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Listing sink failed: {0}")]
    Sink(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
