//! Relevance scoring of candidate items against accumulated preferences.
//!
//! Each category score is the share of that category's total preference
//! mass held by the candidate's attribute values, normalized to [0, 1].
//! The combined score is a fixed-weight linear blend of seven categories.

use catalog::Item;
use profile::PreferenceStore;
use std::collections::HashMap;

// Fixed category weights; they sum to 1.00.
pub const GENRE_WEIGHT: f32 = 0.35;
pub const ACTOR_WEIGHT: f32 = 0.20;
pub const DIRECTOR_WEIGHT: f32 = 0.15;
pub const THEME_WEIGHT: f32 = 0.15;
pub const SOURCE_WEIGHT: f32 = 0.05;
pub const DECADE_WEIGHT: f32 = 0.05;
pub const RATING_BOOST_WEIGHT: f32 = 0.05;

/// The seven unweighted per-category sub-scores behind a relevance score.
///
/// Exposed for observability; all values are in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub genre: f32,
    pub actor: f32,
    pub director: f32,
    pub theme: f32,
    pub source: f32,
    pub decade: f32,
    pub rating_boost: f32,
}

/// An item paired with its relevance score and the sub-scores behind it.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub item: Item,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Pair an item with a score that has no per-category breakdown
    /// (similarity and trending modes).
    pub fn new(item: Item, score: f32) -> Self {
        Self {
            item,
            score,
            breakdown: ScoreBreakdown::default(),
        }
    }
}

/// Score a candidate item against the accumulated preferences.
pub fn score_item(prefs: &PreferenceStore, item: &Item) -> ScoredCandidate {
    let breakdown = ScoreBreakdown {
        genre: averaged_share(prefs.genres(), &item.genres),
        actor: averaged_share(prefs.actors(), &item.actors),
        director: single_share(prefs.directors(), item.director.as_deref()),
        theme: averaged_share(prefs.themes(), &item.themes),
        source: single_share(prefs.sources(), item.source.as_deref()),
        decade: decade_share(prefs.decades(), item.decade()),
        rating_boost: item.rating.unwrap_or(0.0) / 10.0,
    };

    let score = breakdown.genre * GENRE_WEIGHT
        + breakdown.actor * ACTOR_WEIGHT
        + breakdown.director * DIRECTOR_WEIGHT
        + breakdown.theme * THEME_WEIGHT
        + breakdown.source * SOURCE_WEIGHT
        + breakdown.decade * DECADE_WEIGHT
        + breakdown.rating_boost * RATING_BOOST_WEIGHT;

    ScoredCandidate {
        item: item.clone(),
        score,
        breakdown,
    }
}

/// Average, over the item's values, of each value's share of the category's
/// total accumulated weight. Zero when the item has no values in the
/// category or the category has no accumulated weight.
fn averaged_share(accumulator: &HashMap<String, f32>, values: &[String]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let total: f32 = accumulator.values().sum();
    if total == 0.0 {
        return 0.0;
    }
    let sum: f32 = values
        .iter()
        .map(|value| accumulator.get(value).copied().unwrap_or(0.0) / total)
        .sum();
    sum / values.len() as f32
}

/// Share for a single-valued category (director, source).
fn single_share(accumulator: &HashMap<String, f32>, value: Option<&str>) -> f32 {
    let Some(value) = value else {
        return 0.0;
    };
    let total: f32 = accumulator.values().sum();
    if total == 0.0 {
        return 0.0;
    }
    accumulator.get(value).copied().unwrap_or(0.0) / total
}

fn decade_share(accumulator: &HashMap<u16, f32>, decade: Option<u16>) -> f32 {
    let Some(decade) = decade else {
        return 0.0;
    };
    let total: f32 = accumulator.values().sum();
    if total == 0.0 {
        return 0.0;
    }
    accumulator.get(&decade).copied().unwrap_or(0.0) / total
}
