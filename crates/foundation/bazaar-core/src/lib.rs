//! # Bazaar Core
//!
//! Shared data model for the Bazaar classifieds marketplace.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BAZAAR CORE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Listing ─── Seller            Category taxonomy             │
//! │     │                            │                           │
//! │     └── keywords, images         └── subcategories           │
//! │                                                              │
//! │  validate: FieldError / ValidationErrors / length caps       │
//! │  price:    "1,40,000" <-> 140000                             │
//! │  keywords: comma-separated set, duplicates suppressed        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is synchronous and free of I/O. The catalog, favorites,
//! wizard and web crates all build on these types.

pub mod category;
pub mod keywords;
pub mod listing;
pub mod price;
pub mod validate;

pub use category::{
    find_category, resolve_category, resolve_subcategory, Category, DetailKind, CATEGORIES,
    PROPERTY_FOR_SALE,
};
pub use keywords::{merge_keyword, split_keywords};
pub use listing::{Listing, Seller};
pub use price::{format_grouped, parse_grouped};
pub use validate::{FieldError, ValidationErrors};

/// Result type for bazaar-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bazaar-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown subcategory '{subcategory}' for category '{category}'")]
    UnknownSubcategory { category: String, subcategory: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}
