//! # Bazaar Favorites
//!
//! A user-local set of liked listing ids, persisted through a small
//! key/value capability ([`KvStore`]).
//!
//! Lifecycle: the store starts **not loaded**, is loaded exactly once at
//! startup, then mutated by [`FavoritesStore::toggle`]. Every toggle writes
//! through to the backing store before returning, so a restart observes the
//! latest set.
//!
//! Persisted form: one entry, [`FAVORITES_KEY`], holding a JSON array of id
//! strings.

pub mod kv;
pub mod store;

pub use kv::{JsonFileKv, KvStore, MemoryKv};
pub use store::{FavoriteStatus, FavoritesStore, FAVORITES_KEY};

/// Result type for bazaar-favorites operations
pub type Result<T> = std::result::Result<T, FavoritesError>;

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Favorites have not been loaded yet")]
    NotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Backend(String),
}
