//! Content similarity between two items, independent of user preferences.
//!
//! Used by the more-like-this mode: overlap ratios are taken against the
//! reference item's attribute counts, so the score measures how much of the
//! reference the candidate covers.

use catalog::Item;

const GENRE_SIMILARITY_WEIGHT: f32 = 0.4;
const ACTOR_SIMILARITY_WEIGHT: f32 = 0.25;
const DIRECTOR_MATCH_BONUS: f32 = 0.2;
const THEME_SIMILARITY_WEIGHT: f32 = 0.15;

/// Similarity of `candidate` to `reference` based purely on shared
/// attributes.
pub fn similarity_score(reference: &Item, candidate: &Item) -> f32 {
    let mut score =
        overlap_ratio(&reference.genres, &candidate.genres) * GENRE_SIMILARITY_WEIGHT;

    // Actor and theme terms only apply when both sides carry values.
    if !reference.actors.is_empty() && !candidate.actors.is_empty() {
        score += overlap_ratio(&reference.actors, &candidate.actors) * ACTOR_SIMILARITY_WEIGHT;
    }

    if let (Some(a), Some(b)) = (&reference.director, &candidate.director) {
        if a == b {
            score += DIRECTOR_MATCH_BONUS;
        }
    }

    if !reference.themes.is_empty() && !candidate.themes.is_empty() {
        score += overlap_ratio(&reference.themes, &candidate.themes) * THEME_SIMILARITY_WEIGHT;
    }

    score
}

/// Count of shared values over the reference's value count (at least 1).
fn overlap_ratio(reference: &[String], candidate: &[String]) -> f32 {
    let shared = reference
        .iter()
        .filter(|value| candidate.contains(value))
        .count();
    shared as f32 / reference.len().max(1) as f32
}
