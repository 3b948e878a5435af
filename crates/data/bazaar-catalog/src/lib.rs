//! # Bazaar Catalog
//!
//! In-memory listing catalog with the two browse queries the storefront
//! needs:
//!
//! - text search: case-insensitive substring over title, description and
//!   keywords (any field may match)
//! - category filter: exact name, `"all"` disables it
//!
//! Both filters are ANDed. Listings are loaded once (built-in sample data or
//! a JSON seed file) and never mutated afterwards.

pub mod sample;

use bazaar_core::{Listing, ValidationErrors};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

pub use sample::sample_listings;

/// Sentinel category value that disables the category filter
pub const ALL_CATEGORIES: &str = "all";

/// Result type for bazaar-catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Duplicate listing id: {0}")]
    DuplicateId(String),

    #[error("Invalid listing {id}: {source}")]
    InvalidListing {
        id: String,
        #[source]
        source: bazaar_core::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Browse filters, as carried by the `q` / `category` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductQuery {
    #[serde(default, rename = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            category: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            query: None,
            category: Some(category.into()),
        }
    }

    /// Lowercased search text, `None` when absent or empty
    fn needle(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Category to filter on, `None` when absent, empty or `"all"`
    pub fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let text_ok = self
            .needle()
            .map(|n| listing.matches_text(&n))
            .unwrap_or(true);
        let category_ok = self
            .active_category()
            .map(|c| listing.category == c)
            .unwrap_or(true);
        text_ok && category_ok
    }
}

/// The listing catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Build from listings, rejecting duplicate ids and invalid records
    pub fn new(listings: Vec<Listing>) -> Result<Self> {
        let mut seen = HashSet::new();
        for listing in &listings {
            if !seen.insert(listing.id.clone()) {
                return Err(CatalogError::DuplicateId(listing.id.clone()));
            }
            check_listing(listing).map_err(|errors| CatalogError::InvalidListing {
                id: listing.id.clone(),
                source: bazaar_core::Error::Validation(errors),
            })?;
        }
        Ok(Self { listings })
    }

    /// Catalog backed by the built-in sample data
    pub fn sample() -> Self {
        Self {
            listings: sample_listings(),
        }
    }

    /// Load a JSON array of listings
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let listings: Vec<Listing> = serde_json::from_str(&content)?;
        tracing::info!("Loaded {} listings from {}", listings.len(), path.display());
        Self::new(listings)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    /// Listings matching `query`, in catalog order
    pub fn products(&self, query: &ProductQuery) -> Vec<&Listing> {
        self.listings.iter().filter(|l| query.matches(l)).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Like [`Catalog::get`], but absence is an error
    pub fn find(&self, id: &str) -> Result<&Listing> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Distinct categories present in the catalog, sorted
    pub fn categories(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|l| l.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Listings whose id is in `ids`, in catalog order
    pub fn with_ids<'a, I>(&self, ids: I) -> Vec<&Listing>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: HashSet<&str> = ids.into_iter().collect();
        self.listings
            .iter()
            .filter(|l| wanted.contains(l.id.as_str()))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

fn check_listing(listing: &Listing) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if listing.id.trim().is_empty() {
        errors.push("id", "Listing id is required.");
    }
    if listing.title.trim().is_empty() {
        errors.push("title", "Title is required.");
    }
    if listing.price == 0 {
        errors.push("price", "Price must be positive.");
    }
    if listing.category.trim().is_empty() {
        errors.push("category", "Category is required.");
    }
    errors.into_result(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_text_query_guitar() {
        let catalog = Catalog::sample();
        let found = catalog.products(&ProductQuery::text("guitar"));
        assert_eq!(ids(&found), vec!["3"]);

        let found = catalog.products(&ProductQuery::text("GUITAR"));
        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn test_text_query_hits_keywords() {
        let catalog = Catalog::sample();
        // "photography" is only a keyword on the camera listing
        let found = catalog.products(&ProductQuery::text("photography"));
        assert_eq!(ids(&found), vec!["4"]);
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::sample();
        let bikes = catalog.products(&ProductQuery::category("Bikes"));
        assert_eq!(ids(&bikes), vec!["2", "8"]);

        let all = catalog.products(&ProductQuery::category(ALL_CATEGORIES));
        assert_eq!(all.len(), catalog.len());

        assert!(catalog.products(&ProductQuery::category("bikes")).is_empty());
    }

    #[test]
    fn test_filters_are_anded() {
        let catalog = Catalog::sample();
        let query = ProductQuery {
            query: Some("vintage".into()),
            category: Some("Bikes".into()),
        };
        assert_eq!(ids(&catalog.products(&query)), vec!["8"]);
    }

    #[test]
    fn test_empty_query_is_unfiltered() {
        let catalog = Catalog::sample();
        let query = ProductQuery {
            query: Some(String::new()),
            category: Some(String::new()),
        };
        assert_eq!(catalog.products(&query).len(), 8);
    }

    #[test]
    fn test_categories_sorted_distinct() {
        let catalog = Catalog::sample();
        assert_eq!(
            catalog.categories(),
            vec!["Bikes", "Books", "Electronics", "Furniture", "Musical Instruments"]
        );
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.find("4").unwrap().price, 140000);
        assert!(matches!(catalog.find("99"), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_with_ids_keeps_catalog_order() {
        let catalog = Catalog::sample();
        let found = catalog.with_ids(["8", "1", "missing"]);
        assert_eq!(ids(&found), vec!["1", "8"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut listings = sample_listings();
        listings.push(listings[0].clone());
        assert!(matches!(Catalog::new(listings), Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_seed_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let seed = &sample_listings()[..2];
        std::fs::write(&path, serde_json::to_string(seed).unwrap()).unwrap();

        let catalog = Catalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("2").unwrap().category, "Bikes");
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut listings = sample_listings();
        listings[0].price = 0;
        let err = Catalog::new(listings).unwrap_err();
        assert!(err.to_string().contains("Invalid listing 1"));
    }
}
