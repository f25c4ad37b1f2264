//! The user profile: viewing history, ratings, watched set, and preferences.
//!
//! This is the single mutable owner of all per-user state. Views and ratings
//! feed the preference accumulators with a policy-defined weight; candidates
//! and catalogs are never stored here.

use crate::preferences::PreferenceStore;
use catalog::{Item, ItemId, RatingEntry, ViewEvent};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Preference weight applied when a view was watched to completion.
pub const COMPLETED_VIEW_WEIGHT: f32 = 1.0;
/// Preference weight applied when a view was abandoned part-way.
pub const PARTIAL_VIEW_WEIGHT: f32 = 0.5;

/// All mutable per-user state owned by one engine instance.
///
/// Invariants:
/// - `history` is append-only and kept in insertion (chronological) order
/// - `watched` only grows, except on `reset`
/// - preference weights never decrease, except on `reset`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    history: Vec<ViewEvent>,
    #[serde(default)]
    watched: HashSet<ItemId>,
    #[serde(default)]
    ratings: HashMap<ItemId, RatingEntry>,
    #[serde(default)]
    preferences: PreferenceStore,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a profile from previously persisted or imported parts.
    pub fn from_parts(
        history: Vec<ViewEvent>,
        ratings: HashMap<ItemId, RatingEntry>,
        watched: HashSet<ItemId>,
        preferences: PreferenceStore,
    ) -> Self {
        Self {
            history,
            watched,
            ratings,
            preferences,
        }
    }

    /// Record that the user viewed `item`.
    ///
    /// Appends a snapshot event, marks the item watched, and accumulates
    /// preferences with weight 1.0 for a completed view or 0.5 otherwise.
    pub fn record_view(
        &mut self,
        item: &Item,
        watch_duration_secs: Option<u32>,
        completed: bool,
        now_ms: i64,
    ) {
        self.history.push(ViewEvent {
            item_id: item.id.clone(),
            item: item.clone(),
            timestamp: now_ms,
            watch_duration_secs,
            completed,
        });
        self.watched.insert(item.id.clone());

        let weight = if completed {
            COMPLETED_VIEW_WEIGHT
        } else {
            PARTIAL_VIEW_WEIGHT
        };
        self.preferences.record(item, weight);
        debug!("Recorded view of {} (weight {})", item.id, weight);
    }

    /// Record a 1-10 rating for an item, overwriting any earlier rating.
    ///
    /// If the item appears in the viewing history (first match in insertion
    /// order), its snapshot feeds the preference accumulators with weight
    /// `rating / 10`. A rating for an item that was never viewed is still
    /// stored but contributes no preference update.
    pub fn rate_item(&mut self, item_id: &str, rating: f32, now_ms: i64) {
        self.ratings.insert(
            item_id.to_string(),
            RatingEntry {
                item_id: item_id.to_string(),
                rating,
                timestamp: now_ms,
            },
        );

        let viewed_item = self
            .history
            .iter()
            .find(|event| event.item_id == item_id)
            .map(|event| event.item.clone());

        match viewed_item {
            Some(item) => {
                self.preferences.record(&item, rating / 10.0);
                debug!("Rated {} at {} with preference update", item_id, rating);
            }
            None => {
                debug!("Rated {} at {} without matching view", item_id, rating);
            }
        }
    }

    // Read-only accessors

    /// Chronologically ordered view events, oldest first.
    pub fn history(&self) -> &[ViewEvent] {
        &self.history
    }

    pub fn watched(&self) -> &HashSet<ItemId> {
        &self.watched
    }

    pub fn is_watched(&self, item_id: &str) -> bool {
        self.watched.contains(item_id)
    }

    pub fn ratings(&self) -> &HashMap<ItemId, RatingEntry> {
        &self.ratings
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Clear all state. The only operation that shrinks the watched set.
    pub fn reset(&mut self) {
        self.history.clear();
        self.watched.clear();
        self.ratings.clear();
        self.preferences.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Item {
        Item::new("m1", "The Matrix")
            .with_genres(&["Action", "SciFi"])
            .with_director("The Wachowskis")
            .with_year(1999)
    }

    #[test]
    fn test_record_view_appends_snapshot_and_marks_watched() {
        let mut profile = UserProfile::new();
        profile.record_view(&matrix(), Some(8160), true, 1_000);

        assert_eq!(profile.history().len(), 1);
        assert!(profile.is_watched("m1"));
        assert_eq!(profile.history()[0].timestamp, 1_000);
        assert_eq!(profile.history()[0].item.title, "The Matrix");
    }

    #[test]
    fn test_view_snapshot_survives_catalog_edits() {
        let mut profile = UserProfile::new();
        let mut item = matrix();
        profile.record_view(&item, None, true, 1_000);

        // Mutating the caller's copy must not affect the recorded event.
        item.title = "Renamed".to_string();
        assert_eq!(profile.history()[0].item.title, "The Matrix");
    }

    #[test]
    fn test_completed_and_partial_view_weights() {
        let mut profile = UserProfile::new();
        profile.record_view(&matrix(), None, true, 1_000);
        profile.record_view(&matrix(), None, false, 2_000);

        // 1.0 for the completed view + 0.5 for the partial one.
        assert_eq!(profile.preferences().genres()["Action"], 1.5);
    }

    #[test]
    fn test_rate_viewed_item_updates_preferences() {
        let mut profile = UserProfile::new();
        profile.record_view(&matrix(), None, true, 1_000);
        profile.rate_item("m1", 8.0, 2_000);

        // 1.0 from the view + 0.8 from the rating.
        assert!((profile.preferences().genres()["Action"] - 1.8).abs() < 1e-6);
        assert_eq!(profile.ratings()["m1"].rating, 8.0);
    }

    #[test]
    fn test_rate_unviewed_item_records_but_skips_preferences() {
        let mut profile = UserProfile::new();
        profile.rate_item("unseen", 9.0, 1_000);

        assert_eq!(profile.ratings().len(), 1);
        assert!(
            profile.preferences().is_empty(),
            "rating without a matching view must not touch preferences"
        );
    }

    #[test]
    fn test_rate_uses_first_history_match() {
        let mut profile = UserProfile::new();
        let old = matrix();
        let renamed = Item::new("m1", "The Matrix").with_genres(&["Documentary"]);
        profile.record_view(&old, None, true, 1_000);
        profile.record_view(&renamed, None, true, 2_000);

        profile.rate_item("m1", 10.0, 3_000);

        // The earliest snapshot feeds the update: Action gains 1.0 view +
        // 1.0 rating weight, Documentary only the 1.0 view weight.
        assert_eq!(profile.preferences().genres()["Action"], 2.0);
        assert_eq!(profile.preferences().genres()["Documentary"], 1.0);
    }

    #[test]
    fn test_later_rating_overwrites_earlier() {
        let mut profile = UserProfile::new();
        profile.rate_item("m1", 3.0, 1_000);
        profile.rate_item("m1", 9.0, 2_000);

        assert_eq!(profile.ratings().len(), 1);
        assert_eq!(profile.ratings()["m1"].rating, 9.0);
        assert_eq!(profile.ratings()["m1"].timestamp, 2_000);
    }

    #[test]
    fn test_watched_set_never_shrinks_without_reset() {
        let mut profile = UserProfile::new();
        profile.record_view(&matrix(), None, true, 1_000);
        profile.record_view(&matrix(), None, false, 2_000);
        assert_eq!(profile.watched().len(), 1);

        profile.reset();
        assert!(profile.watched().is_empty());
        assert!(profile.history().is_empty());
        assert!(profile.preferences().is_empty());
    }
}
