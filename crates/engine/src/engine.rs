//! # Personalization Engine
//!
//! The stateful facade that ties the components together:
//! 1. Feedback (views, ratings) mutates the user profile
//! 2. Every mutation invalidates the recommendation cache
//! 3. Every mutation is persisted to the state slot, in-memory first
//! 4. Ranking queries delegate to the pipeline crate
//! 5. The default mode's output is memoized for five minutes
//!
//! One engine instance owns one user's state; callers must serialize
//! access themselves if they share an instance.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use catalog::{Item, ItemId, RatingEntry, ViewEvent};
use pipeline::{RecommendOptions, ScoredCandidate};
use profile::{compute_statistics, PreferenceStore, ProfileStatistics, UserProfile};

use crate::cache::RecommendationCache;
use crate::clock::{Clock, SystemClock};
use crate::storage::{PersistedState, StateStore, STATE_KEY};

/// Full engine state plus a statistics snapshot, as produced by
/// `export_data` and accepted by `import_data`.
///
/// All fields default to empty so partial payloads import cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportData {
    #[serde(default)]
    pub history: Vec<ViewEvent>,
    #[serde(default)]
    pub ratings: HashMap<ItemId, RatingEntry>,
    #[serde(default)]
    pub watched: HashSet<ItemId>,
    #[serde(default)]
    pub preferences: PreferenceStore,
    #[serde(default)]
    pub statistics: ProfileStatistics,
    #[serde(default)]
    pub exported_at: i64,
}

/// Stateful personalization engine for a single user.
pub struct PersonalizationEngine {
    profile: UserProfile,
    cache: RecommendationCache,
    store: Box<dyn StateStore>,
    clock: Rc<dyn Clock>,
}

impl PersonalizationEngine {
    /// Create an engine backed by `store`, restoring any previously
    /// persisted state. A missing or malformed slot yields empty defaults.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self::with_clock(store, Rc::new(SystemClock))
    }

    /// Like `new`, but with an explicit time source.
    pub fn with_clock(store: Box<dyn StateStore>, clock: Rc<dyn Clock>) -> Self {
        let profile = load_profile(store.as_ref());
        Self {
            profile,
            cache: RecommendationCache::new(),
            store,
            clock,
        }
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    /// Record that the user viewed `item`.
    pub fn record_view(
        &mut self,
        item: &Item,
        watch_duration_secs: Option<u32>,
        completed: bool,
    ) {
        let now = self.clock.now_ms();
        self.profile
            .record_view(item, watch_duration_secs, completed, now);
        self.cache.invalidate();
        self.persist();
        info!("Recorded view of {}", item.id);
    }

    /// Record a 1-10 rating for an item.
    ///
    /// Values outside the scale are stored as-is; input validation is the
    /// caller's concern.
    pub fn rate_item(&mut self, item_id: &str, rating: f32) {
        let now = self.clock.now_ms();
        self.profile.rate_item(item_id, rating, now);
        self.cache.invalidate();
        self.persist();
        info!("Recorded rating {} for {}", rating, item_id);
    }

    // ------------------------------------------------------------------
    // Ranking queries
    // ------------------------------------------------------------------

    /// Default recommendation mode, memoized for five minutes.
    ///
    /// A valid cache entry is sliced to `count` and returned as-is. The
    /// cold-start path is never cached because its input (no history) is
    /// about to change with the first recorded view.
    pub fn recommendations(
        &mut self,
        candidates: &[Item],
        count: usize,
        options: &RecommendOptions,
    ) -> Vec<ScoredCandidate> {
        let now = self.clock.now_ms();
        if let Some(cached) = self.cache.get(now) {
            debug!("Serving {} recommendations from cache", cached.len().min(count));
            return cached.iter().take(count).cloned().collect();
        }

        let results = pipeline::recommend(&self.profile, candidates, count, options);
        if !self.profile.history().is_empty() {
            self.cache.store(results.clone(), now);
        }
        info!("Computed {} recommendations", results.len());
        results
    }

    /// Cold-start mode: rank purely by declared rating.
    pub fn cold_start_recommendations(
        &self,
        candidates: &[Item],
        count: usize,
    ) -> Vec<ScoredCandidate> {
        pipeline::cold_start(candidates, count)
    }

    /// Content-similar items to a reference item.
    pub fn more_like_this(
        &self,
        reference: &Item,
        candidates: &[Item],
        count: usize,
    ) -> Vec<ScoredCandidate> {
        pipeline::more_like_this(&self.profile, reference, candidates, count)
    }

    /// Genre trends from the trailing time window of the viewing history.
    pub fn trending(
        &self,
        candidates: &[Item],
        count: usize,
        window_days: i64,
    ) -> Vec<ScoredCandidate> {
        pipeline::trending(
            &self.profile,
            candidates,
            count,
            window_days,
            self.clock.now_ms(),
        )
    }

    /// Fully scored recommendations restricted to one genre.
    pub fn genre_recommendations(
        &self,
        genre: &str,
        candidates: &[Item],
        count: usize,
    ) -> Vec<ScoredCandidate> {
        pipeline::by_genre(&self.profile, genre, candidates, count)
    }

    // ------------------------------------------------------------------
    // State access, export/import
    // ------------------------------------------------------------------

    /// Read-only view of the owned user profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Derived statistics snapshot.
    pub fn statistics(&self) -> ProfileStatistics {
        compute_statistics(&self.profile)
    }

    /// Full state plus statistics, suitable for backup or transfer.
    pub fn export_data(&self) -> ExportData {
        ExportData {
            history: self.profile.history().to_vec(),
            ratings: self.profile.ratings().clone(),
            watched: self.profile.watched().clone(),
            preferences: self.profile.preferences().clone(),
            statistics: compute_statistics(&self.profile),
            exported_at: self.clock.now_ms(),
        }
    }

    /// Replace all in-memory state from an exported payload, then persist.
    ///
    /// Missing fields default to empty. Malformed input is logged and
    /// ignored; returns whether the import was applied.
    pub fn import_data(&mut self, data: serde_json::Value) -> bool {
        match serde_json::from_value::<ExportData>(data) {
            Ok(imported) => {
                self.profile = UserProfile::from_parts(
                    imported.history,
                    imported.ratings,
                    imported.watched,
                    imported.preferences,
                );
                self.cache.invalidate();
                self.persist();
                info!(
                    "Imported state: {} views, {} ratings",
                    self.profile.history().len(),
                    self.profile.ratings().len()
                );
                true
            }
            Err(err) => {
                warn!("Ignoring malformed import payload: {}", err);
                false
            }
        }
    }

    /// Clear all state, invalidate the cache, and persist the empty slot.
    pub fn reset(&mut self) {
        self.profile.reset();
        self.cache.invalidate();
        self.persist();
        info!("Engine state reset");
    }

    /// Serialize the current state into the store's fixed slot.
    ///
    /// In-memory state is already updated when this runs; a failing store
    /// costs durability only, so errors are logged, never propagated.
    fn persist(&mut self) {
        let state = PersistedState {
            history: self.profile.history().to_vec(),
            ratings: self.profile.ratings().clone(),
            watched: self.profile.watched().clone(),
            preferences: self.profile.preferences().clone(),
            saved_at: self.clock.now_ms(),
        };

        let payload = match serde_json::to_string(&state) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to serialize state: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.save(STATE_KEY, &payload) {
            warn!("Failed to persist state: {}", err);
        }
    }
}

/// Load the profile from the state slot, falling back to empty defaults on
/// a missing slot, a storage error, or a malformed payload.
fn load_profile(store: &dyn StateStore) -> UserProfile {
    let payload = match store.load(STATE_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return UserProfile::new(),
        Err(err) => {
            warn!("Failed to load persisted state: {}", err);
            return UserProfile::new();
        }
    };

    match serde_json::from_str::<PersistedState>(&payload) {
        Ok(state) => {
            debug!(
                "Restored state: {} views, {} ratings",
                state.history.len(),
                state.ratings.len()
            );
            UserProfile::from_parts(state.history, state.ratings, state.watched, state.preferences)
        }
        Err(err) => {
            warn!("Persisted state was malformed, starting empty: {}", err);
            UserProfile::new()
        }
    }
}
