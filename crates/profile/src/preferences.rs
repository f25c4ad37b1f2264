//! Weighted per-attribute preference accumulators.
//!
//! Six independent mappings from attribute value to accumulated weight:
//! genre, actor, director, theme, source, and release decade. Weights only
//! ever increase; the store is a monotonic accumulator that is cleared only
//! by an explicit full reset.

use catalog::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated affinity weights per attribute category.
///
/// An item with several values in one category (e.g. three genres) adds the
/// full weight to each value; contributions are never divided at write time.
/// Normalization into shares happens at read time in the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceStore {
    #[serde(default)]
    genres: HashMap<String, f32>,
    #[serde(default)]
    actors: HashMap<String, f32>,
    #[serde(default)]
    directors: HashMap<String, f32>,
    #[serde(default)]
    themes: HashMap<String, f32>,
    #[serde(default)]
    sources: HashMap<String, f32>,
    #[serde(default)]
    decades: HashMap<u16, f32>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `weight` for every populated attribute on `item`.
    ///
    /// Missing attributes contribute nothing; this is a pure accumulation
    /// step with no failure modes.
    pub fn record(&mut self, item: &Item, weight: f32) {
        for genre in &item.genres {
            *self.genres.entry(genre.clone()).or_insert(0.0) += weight;
        }
        for actor in &item.actors {
            *self.actors.entry(actor.clone()).or_insert(0.0) += weight;
        }
        if let Some(director) = &item.director {
            *self.directors.entry(director.clone()).or_insert(0.0) += weight;
        }
        for theme in &item.themes {
            *self.themes.entry(theme.clone()).or_insert(0.0) += weight;
        }
        if let Some(source) = &item.source {
            *self.sources.entry(source.clone()).or_insert(0.0) += weight;
        }
        if let Some(decade) = item.decade() {
            *self.decades.entry(decade).or_insert(0.0) += weight;
        }
    }

    // Accessors - the scorer reads the raw maps and normalizes against the
    // category totals itself.

    pub fn genres(&self) -> &HashMap<String, f32> {
        &self.genres
    }

    pub fn actors(&self) -> &HashMap<String, f32> {
        &self.actors
    }

    pub fn directors(&self) -> &HashMap<String, f32> {
        &self.directors
    }

    pub fn themes(&self) -> &HashMap<String, f32> {
        &self.themes
    }

    pub fn sources(&self) -> &HashMap<String, f32> {
        &self.sources
    }

    pub fn decades(&self) -> &HashMap<u16, f32> {
        &self.decades
    }

    /// True when no weight has been accumulated in any category.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.actors.is_empty()
            && self.directors.is_empty()
            && self.themes.is_empty()
            && self.sources.is_empty()
            && self.decades.is_empty()
    }

    /// Top `n` values of a category by accumulated weight, descending.
    pub fn top_genres(&self, n: usize) -> Vec<(String, f32)> {
        top_n(&self.genres, n)
    }

    pub fn top_actors(&self, n: usize) -> Vec<(String, f32)> {
        top_n(&self.actors, n)
    }

    pub fn top_directors(&self, n: usize) -> Vec<(String, f32)> {
        top_n(&self.directors, n)
    }

    /// Clear every accumulator. The only way weights ever decrease.
    pub fn reset(&mut self) {
        self.genres.clear();
        self.actors.clear();
        self.directors.clear();
        self.themes.clear();
        self.sources.clear();
        self.decades.clear();
    }
}

fn top_n(map: &HashMap<String, f32>, n: usize) -> Vec<(String, f32)> {
    let mut entries: Vec<(String, f32)> =
        map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}
