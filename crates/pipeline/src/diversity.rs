//! Greedy diversity re-selection over a score-sorted candidate list.
//!
//! Repeated genres and sources among the already-selected items penalize a
//! candidate's adjusted score; acceptance order always follows the original
//! score-descending order, never the adjusted scores.

use crate::scorer::ScoredCandidate;
use std::collections::HashMap;
use tracing::debug;

/// The first this many candidates are always accepted, guaranteeing
/// non-empty output even when every candidate is heavily penalized.
pub const MIN_GUARANTEED_RESULTS: usize = 3;

/// Adjusted score a later candidate must exceed to be accepted.
const ACCEPTANCE_THRESHOLD: f32 = 0.1;

/// Source repeats are penalized at half the strength of genre repeats.
const SOURCE_PENALTY_SCALE: f32 = 0.5;

/// Bucket for items missing a genre or source label.
const UNKNOWN_CATEGORY: &str = "unknown";

/// Greedily select up to `count` candidates from a score-descending list,
/// penalizing repeats of the same primary genre and source.
///
/// ## Algorithm
/// For each candidate in score order:
/// `adjusted = score - genre_repeats * factor - source_repeats * factor * 0.5`
/// Accept when `adjusted > 0.1`, or unconditionally while fewer than
/// `MIN_GUARANTEED_RESULTS` items have been selected.
pub fn apply_diversity_filter(
    ranked: Vec<ScoredCandidate>,
    count: usize,
    diversity_factor: f32,
) -> Vec<ScoredCandidate> {
    let mut genre_counts: HashMap<String, usize> = HashMap::new();
    let mut source_counts: HashMap<String, usize> = HashMap::new();
    let mut selected: Vec<ScoredCandidate> = Vec::new();

    for candidate in ranked {
        if selected.len() >= count {
            break;
        }

        let genre = primary_genre(&candidate);
        let source = source_label(&candidate);

        let genre_penalty =
            genre_counts.get(&genre).copied().unwrap_or(0) as f32 * diversity_factor;
        let source_penalty = source_counts.get(&source).copied().unwrap_or(0) as f32
            * diversity_factor
            * SOURCE_PENALTY_SCALE;
        let adjusted = candidate.score - genre_penalty - source_penalty;

        if adjusted > ACCEPTANCE_THRESHOLD || selected.len() < MIN_GUARANTEED_RESULTS {
            *genre_counts.entry(genre).or_insert(0) += 1;
            *source_counts.entry(source).or_insert(0) += 1;
            selected.push(candidate);
        } else {
            debug!(
                "Diversity filter skipped {} (adjusted score {:.3})",
                candidate.item.id, adjusted
            );
        }
    }

    selected
}

fn primary_genre(candidate: &ScoredCandidate) -> String {
    candidate
        .item
        .genres
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

fn source_label(candidate: &ScoredCandidate) -> String {
    candidate
        .item
        .source
        .clone()
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}
