//! The favorites set and its load-once / mutate-many lifecycle

use crate::{FavoritesError, KvStore, Result};
use std::collections::BTreeSet;

/// Storage key holding the JSON array of favorite ids
pub const FAVORITES_KEY: &str = "bazaar_favorites";

/// Membership as seen by a consumer.
///
/// `Unknown` covers the window before the store is loaded; renderers show a
/// neutral state instead of assuming "not a favorite".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    Unknown,
    Favorite,
    NotFavorite,
}

/// Persisted set of liked listing ids
pub struct FavoritesStore {
    kv: Box<dyn KvStore>,
    ids: Option<BTreeSet<String>>,
}

impl FavoritesStore {
    /// Wrap a backend. Nothing is read until [`FavoritesStore::load`].
    pub fn new(kv: impl KvStore + 'static) -> Self {
        Self {
            kv: Box::new(kv),
            ids: None,
        }
    }

    /// Construct and load in one step
    pub fn open(kv: impl KvStore + 'static) -> Self {
        let mut store = Self::new(kv);
        store.load();
        store
    }

    /// Read the persisted set.
    ///
    /// Unreadable or malformed data is logged and treated as an empty set;
    /// the store is considered loaded either way.
    pub fn load(&mut self) -> &BTreeSet<String> {
        let ids = match self.read() {
            Ok(ids) => {
                tracing::debug!("Loaded {} favorites", ids.len());
                ids
            }
            Err(e) => {
                tracing::warn!("Failed to load favorites, starting empty: {}", e);
                BTreeSet::new()
            }
        };
        self.ids.insert(ids)
    }

    fn read(&self) -> Result<BTreeSet<String>> {
        match self.kv.get(FAVORITES_KEY)? {
            Some(raw) => {
                let ids: Vec<String> = serde_json::from_str(&raw)?;
                Ok(ids.into_iter().collect())
            }
            None => Ok(BTreeSet::new()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.ids.is_some()
    }

    /// Pure membership check. Always `false` before load; use
    /// [`FavoritesStore::status`] where that distinction matters.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.as_ref().map(|s| s.contains(id)).unwrap_or(false)
    }

    pub fn status(&self, id: &str) -> FavoriteStatus {
        match &self.ids {
            None => FavoriteStatus::Unknown,
            Some(ids) if ids.contains(id) => FavoriteStatus::Favorite,
            Some(_) => FavoriteStatus::NotFavorite,
        }
    }

    /// Current set, `None` while not loaded
    pub fn ids(&self) -> Option<&BTreeSet<String>> {
        self.ids.as_ref()
    }

    /// Flip membership of `id`, persist, and return the new set.
    ///
    /// The in-memory set only changes once the write has succeeded.
    pub fn toggle(&mut self, id: &str) -> Result<&BTreeSet<String>> {
        let current = self.ids.as_ref().ok_or(FavoritesError::NotLoaded)?;

        let mut next = current.clone();
        let added = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };

        let raw = serde_json::to_string(&next.iter().collect::<Vec<_>>())?;
        self.kv.set(FAVORITES_KEY, &raw)?;

        tracing::info!(id, added, total = next.len(), "Toggled favorite");
        Ok(self.ids.insert(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonFileKv, MemoryKv};
    use tempfile::tempdir;

    /// Backend whose writes always fail
    struct ReadOnlyKv;

    impl KvStore for ReadOnlyKv {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(FavoritesError::Backend("read-only".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(FavoritesError::Backend("read-only".into()))
        }
    }

    #[test]
    fn test_not_loaded_is_indeterminate() {
        let mut store = FavoritesStore::new(MemoryKv::new());
        assert!(!store.is_loaded());
        assert_eq!(store.status("1"), FavoriteStatus::Unknown);
        assert!(store.ids().is_none());
        assert!(matches!(store.toggle("1"), Err(FavoritesError::NotLoaded)));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let kv = MemoryKv::new();
        let mut store = FavoritesStore::open(kv.clone());
        store.toggle("5").unwrap();
        let before: BTreeSet<String> = store.ids().unwrap().clone();

        store.toggle("3").unwrap();
        assert!(store.is_favorite("3"));
        store.toggle("3").unwrap();

        assert_eq!(store.ids().unwrap(), &before);
        assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some("[\"5\"]"));
    }

    #[test]
    fn test_toggle_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        {
            let mut store = FavoritesStore::open(JsonFileKv::at_path(&path));
            store.toggle("2").unwrap();
            store.toggle("8").unwrap();
        }

        let store = FavoritesStore::open(JsonFileKv::at_path(&path));
        assert_eq!(store.status("2"), FavoriteStatus::Favorite);
        assert_eq!(store.status("8"), FavoriteStatus::Favorite);
        assert_eq!(store.status("1"), FavoriteStatus::NotFavorite);
    }

    #[test]
    fn test_malformed_entry_loads_empty() {
        let mut kv = MemoryKv::new();
        kv.set(FAVORITES_KEY, "{\"oops\":true}").unwrap();

        let store = FavoritesStore::open(kv);
        assert!(store.is_loaded());
        assert!(store.ids().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_accepts_toggles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = FavoritesStore::open(JsonFileKv::at_path(&path));
        assert!(store.is_loaded());
        assert!(store.ids().unwrap().is_empty());

        store.toggle("1").unwrap();
        assert!(store.is_favorite("1"));

        let reopened = FavoritesStore::open(JsonFileKv::at_path(&path));
        assert_eq!(reopened.status("1"), FavoriteStatus::Favorite);
    }

    #[test]
    fn test_failed_write_leaves_set_unchanged() {
        let mut store = FavoritesStore::open(ReadOnlyKv);
        assert!(store.toggle("1").is_err());
        assert!(!store.is_favorite("1"));
        assert_eq!(store.status("1"), FavoriteStatus::NotFavorite);
    }
}
