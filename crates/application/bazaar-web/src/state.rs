//! Application state for the web server

use crate::error::AppError;
use bazaar_catalog::{Catalog, CatalogError};
use bazaar_config::BazaarConfig;
use bazaar_favorites::{FavoritesStore, JsonFileKv};
use bazaar_suggest::{AnthropicSuggester, KeywordSuggester, SuggestionGateway, SuggestionPanel, UnavailableSuggester};
use bazaar_wizard::{ListingSink, LogSink, Wizard};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// Drafts untouched for this long are dropped
pub const DRAFT_TTL_HOURS: i64 = 24;

/// One browser's sell flow: wizard state plus the suggestion panel
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub wizard: Wizard,
    pub panel: SuggestionPanel,
}

/// Sell drafts keyed by the draft cookie
#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: Mutex<HashMap<Uuid, Draft>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` on the draft for `id`, creating it when missing.
    ///
    /// The lock is held only for the duration of `f`; never await inside.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut Draft) -> R) -> Result<R, AppError> {
        let mut drafts = self
            .drafts
            .lock()
            .map_err(|_| AppError::Internal("draft store poisoned".to_string()))?;
        prune(&mut drafts, Utc::now());
        Ok(f(drafts.entry(id).or_default()))
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn prune(drafts: &mut HashMap<Uuid, Draft>, now: DateTime<Utc>) {
    let cutoff = now - Duration::hours(DRAFT_TTL_HOURS);
    let before = drafts.len();
    drafts.retain(|_, d| d.wizard.updated_at() > cutoff);
    if drafts.len() < before {
        tracing::debug!("Dropped {} stale sell drafts", before - drafts.len());
    }
}

/// Shared server state
pub struct AppState {
    /// Listing catalog, read-only after startup
    pub catalog: Catalog,
    /// Liked listing ids
    pub favorites: RwLock<FavoritesStore>,
    /// In-progress sell flows
    pub drafts: DraftStore,
    /// Keyword suggestions
    pub suggest: SuggestionGateway,
    /// Where finished listings go
    pub sink: Arc<dyn ListingSink>,
    /// Server start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        favorites: FavoritesStore,
        suggest: SuggestionGateway,
        sink: Arc<dyn ListingSink>,
    ) -> Self {
        Self {
            catalog,
            favorites: RwLock::new(favorites),
            drafts: DraftStore::new(),
            suggest,
            sink,
            started_at: Utc::now(),
        }
    }

    /// Wire everything up from configuration.
    ///
    /// A missing API key is not fatal: suggestions then always fail softly.
    pub fn from_config(config: &BazaarConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog.seed_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::sample(),
        };

        let favorites_path = config.storage.favorites_path();
        let favorites = FavoritesStore::open(JsonFileKv::at_path(&favorites_path));
        tracing::info!("Favorites stored at {}", favorites_path.display());

        let provider: Arc<dyn KeywordSuggester> =
            match AnthropicSuggester::from_config(&config.suggest) {
                Ok(provider) => Arc::new(provider),
                Err(e) => {
                    tracing::warn!("Keyword suggestions disabled: {}", e);
                    Arc::new(UnavailableSuggester::new(e.to_string()))
                }
            };

        Ok(Self::new(
            catalog,
            favorites,
            SuggestionGateway::new(provider),
            Arc::new(LogSink),
        ))
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    pub fn favorites(&self) -> Result<std::sync::RwLockReadGuard<'_, FavoritesStore>, AppError> {
        self.favorites
            .read()
            .map_err(|_| AppError::Internal("favorites lock poisoned".to_string()))
    }

    pub fn favorites_mut(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, FavoritesStore>, AppError> {
        self.favorites
            .write()
            .map_err(|_| AppError::Internal("favorites lock poisoned".to_string()))
    }
}
