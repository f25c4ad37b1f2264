//! Core domain types for catalog items and feedback events.
//!
//! The catalog itself is always owned by the caller; the engine only ever
//! borrows `Item` slices and snapshots individual items into its history.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog item.
pub type ItemId = String;

/// Milliseconds in one day, used for trending windows and streak gaps.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A single item in the content catalog.
///
/// Every attribute except `id` and `title` is optional or may be empty;
/// missing attributes simply contribute nothing to preference accumulation
/// and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    /// Source label, e.g. a platform or catalog provider name.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    /// Declared quality rating on a 0-10 scale, independent of user history.
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Item {
    /// Create a minimal item with no attributes set.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genres: Vec::new(),
            actors: Vec::new(),
            director: None,
            themes: Vec::new(),
            source: None,
            year: None,
            rating: None,
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_actors(mut self, actors: &[&str]) -> Self {
        self.actors = actors.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_themes(mut self, themes: &[&str]) -> Self {
        self.themes = themes.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Release decade, derived as `floor(year / 10) * 10`.
    pub fn decade(&self) -> Option<u16> {
        self.year.map(decade_of)
    }
}

/// Derive the decade bucket for a release year.
pub fn decade_of(year: u16) -> u16 {
    (year / 10) * 10
}

/// A recorded view of an item.
///
/// The event stores a full snapshot of the item as it existed when viewed,
/// so later catalog edits never retroactively change historical scoring.
/// Events are immutable once recorded and kept in insertion (chronological)
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEvent {
    pub item_id: ItemId,
    /// Snapshot of the item at view time, not a reference into the catalog.
    pub item: Item,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// How long the user watched, in seconds, if known.
    #[serde(default)]
    pub watch_duration_secs: Option<u32>,
    pub completed: bool,
}

/// The user's rating for a single item, on a 1-10 scale.
///
/// There is at most one entry per item id; a later rating overwrites the
/// earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub item_id: ItemId,
    pub rating: f32,
    /// Unix timestamp in milliseconds of the most recent rating.
    pub timestamp: i64,
}
