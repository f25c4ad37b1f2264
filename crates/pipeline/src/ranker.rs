//! Recommendation modes: default ranking plus the specialized variants.
//!
//! All functions here are state-free: they read the user profile and a
//! caller-supplied candidate slice and return fresh score-sorted lists.
//! Ordering of equal scores is not guaranteed.

use crate::diversity::apply_diversity_filter;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{ExcludeWatchedFilter, GenreFilter, MinimumRatingFilter};
use crate::scorer::{score_item, ScoredCandidate};
use crate::similarity::similarity_score;
use catalog::{Item, MS_PER_DAY};
use profile::UserProfile;
use std::collections::HashMap;
use tracing::debug;

/// Diversity factor applied on the cold-start path, regardless of the
/// caller-supplied factor.
pub const COLD_START_DIVERSITY_FACTOR: f32 = 0.5;

/// Default result count for more-like-this queries.
pub const DEFAULT_SIMILAR_COUNT: usize = 6;
/// Default result count for trending and genre queries.
pub const DEFAULT_TRENDING_COUNT: usize = 10;
/// Default trailing window for trending queries, in days.
pub const DEFAULT_TRENDING_WINDOW_DAYS: i64 = 7;

/// Tuning knobs for the default recommendation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendOptions {
    /// Drop candidates the user has already viewed.
    pub exclude_watched: bool,
    /// Drop candidates whose declared rating is below this (inactive at 0).
    pub min_rating: f32,
    /// Strength of the diversity penalty; 0 disables the diversity pass.
    pub diversity_factor: f32,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            exclude_watched: true,
            min_rating: 0.0,
            diversity_factor: 0.3,
        }
    }
}

/// Default recommendation mode.
///
/// Filters candidates, falls back to cold start when there is no viewing
/// history, otherwise ranks by the combined preference score and applies
/// the diversity pass.
pub fn recommend(
    profile: &UserProfile,
    candidates: &[Item],
    count: usize,
    options: &RecommendOptions,
) -> Vec<ScoredCandidate> {
    let mut pipeline = FilterPipeline::new();
    if options.exclude_watched {
        pipeline = pipeline.add_filter(ExcludeWatchedFilter);
    }
    if options.min_rating > 0.0 {
        pipeline = pipeline.add_filter(MinimumRatingFilter::new(options.min_rating));
    }
    let filtered = pipeline.apply(candidates.iter().collect(), profile);

    if profile.history().is_empty() {
        debug!("No viewing history, using cold-start ranking");
        return cold_start_refs(filtered, count);
    }

    let mut scored: Vec<ScoredCandidate> = filtered
        .into_iter()
        .map(|item| score_item(profile.preferences(), item))
        .collect();
    sort_by_score_desc(&mut scored);

    if options.diversity_factor > 0.0 {
        apply_diversity_filter(scored, count, options.diversity_factor)
    } else {
        scored.truncate(count);
        scored
    }
}

/// Cold-start mode: rank purely by declared rating, with a fixed diversity
/// factor. Used when no viewing history exists.
pub fn cold_start(candidates: &[Item], count: usize) -> Vec<ScoredCandidate> {
    cold_start_refs(candidates.iter().collect(), count)
}

fn cold_start_refs(candidates: Vec<&Item>, count: usize) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|item| ScoredCandidate::new(item.clone(), item.rating.unwrap_or(0.0)))
        .collect();
    sort_by_score_desc(&mut scored);
    apply_diversity_filter(scored, count, COLD_START_DIVERSITY_FACTOR)
}

/// More-like-this mode: rank by content similarity to a reference item,
/// independent of accumulated preferences. The reference itself and watched
/// items are excluded; no diversity pass is applied.
pub fn more_like_this(
    profile: &UserProfile,
    reference: &Item,
    candidates: &[Item],
    count: usize,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|item| item.id != reference.id && !profile.is_watched(&item.id))
        .map(|item| ScoredCandidate::new(item.clone(), similarity_score(reference, item)))
        .collect();
    sort_by_score_desc(&mut scored);
    scored.truncate(count);
    scored
}

/// Trending mode: rank non-watched candidates by genre weight accumulated
/// from views inside the trailing time window only.
///
/// The transient accumulator never touches the persistent preferences and
/// is discarded after the call. Falls back to the default mode when the
/// window holds no views.
pub fn trending(
    profile: &UserProfile,
    candidates: &[Item],
    count: usize,
    window_days: i64,
    now_ms: i64,
) -> Vec<ScoredCandidate> {
    let cutoff = now_ms - window_days * MS_PER_DAY;
    let recent: Vec<_> = profile
        .history()
        .iter()
        .filter(|event| event.timestamp >= cutoff)
        .collect();

    if recent.is_empty() {
        debug!("No views in the last {} days, falling back to default mode", window_days);
        return recommend(profile, candidates, count, &RecommendOptions::default());
    }

    let mut genre_weights: HashMap<&str, f32> = HashMap::new();
    for event in &recent {
        let weight = if event.completed { 1.0 } else { 0.5 };
        for genre in &event.item.genres {
            *genre_weights.entry(genre.as_str()).or_insert(0.0) += weight;
        }
    }

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|item| !profile.is_watched(&item.id))
        .map(|item| {
            // Raw sum of windowed genre weights, not a normalized share.
            let score: f32 = item
                .genres
                .iter()
                .map(|genre| genre_weights.get(genre.as_str()).copied().unwrap_or(0.0))
                .sum();
            ScoredCandidate::new(item.clone(), score)
        })
        .collect();
    sort_by_score_desc(&mut scored);
    scored.truncate(count);
    scored
}

/// Genre mode: rank non-watched candidates of one genre by the full
/// combined preference score.
pub fn by_genre(
    profile: &UserProfile,
    genre: &str,
    candidates: &[Item],
    count: usize,
) -> Vec<ScoredCandidate> {
    let pipeline = FilterPipeline::new()
        .add_filter(ExcludeWatchedFilter)
        .add_filter(GenreFilter::new(genre));
    let filtered = pipeline.apply(candidates.iter().collect(), profile);

    let mut scored: Vec<ScoredCandidate> = filtered
        .into_iter()
        .map(|item| score_item(profile.preferences(), item))
        .collect();
    sort_by_score_desc(&mut scored);
    scored.truncate(count);
    scored
}

fn sort_by_score_desc(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_fixture() -> Vec<Item> {
        vec![
            Item::new("m1", "Action One")
                .with_genres(&["Action"])
                .with_source("alpha")
                .with_rating(7.0),
            Item::new("m2", "Action Two")
                .with_genres(&["Action"])
                .with_source("beta")
                .with_rating(9.0),
            Item::new("m3", "Drama One")
                .with_genres(&["Drama"])
                .with_source("alpha")
                .with_rating(8.0),
            Item::new("m4", "Comedy One")
                .with_genres(&["Comedy"])
                .with_source("beta")
                .with_rating(5.0),
        ]
    }

    fn profile_liking_action() -> UserProfile {
        let mut profile = UserProfile::new();
        profile.record_view(
            &Item::new("seen", "Seen Action").with_genres(&["Action"]),
            None,
            true,
            1_000,
        );
        profile
    }

    #[test]
    fn test_recommend_prefers_learned_genres() {
        let profile = profile_liking_action();
        let results = recommend(&profile, &catalog_fixture(), 4, &RecommendOptions::default());

        assert!(!results.is_empty());
        assert_eq!(
            results[0].item.genres[0], "Action",
            "top result should match the learned genre"
        );
        assert!(results[0].breakdown.genre > 0.0);
    }

    #[test]
    fn test_recommend_excludes_watched_by_default() {
        let mut profile = UserProfile::new();
        let catalog = catalog_fixture();
        profile.record_view(&catalog[0], None, true, 1_000);

        let results = recommend(&profile, &catalog, 10, &RecommendOptions::default());
        assert!(results.iter().all(|c| c.item.id != "m1"));
    }

    #[test]
    fn test_recommend_can_include_watched() {
        let mut profile = UserProfile::new();
        let catalog = catalog_fixture();
        profile.record_view(&catalog[0], None, true, 1_000);

        let options = RecommendOptions {
            exclude_watched: false,
            ..Default::default()
        };
        let results = recommend(&profile, &catalog, 10, &options);
        assert!(results.iter().any(|c| c.item.id == "m1"));
    }

    #[test]
    fn test_recommend_min_rating_filter() {
        let profile = profile_liking_action();
        let options = RecommendOptions {
            min_rating: 7.5,
            diversity_factor: 0.0,
            ..Default::default()
        };

        let results = recommend(&profile, &catalog_fixture(), 10, &options);
        assert!(results.iter().all(|c| c.item.rating.unwrap_or(0.0) >= 7.5));
    }

    #[test]
    fn test_recommend_zero_diversity_truncates_only() {
        let profile = profile_liking_action();
        let options = RecommendOptions {
            diversity_factor: 0.0,
            ..Default::default()
        };

        let results = recommend(&profile, &catalog_fixture(), 2, &options);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_cold_start_triggered_by_empty_history() {
        let profile = UserProfile::new();
        let results = recommend(&profile, &catalog_fixture(), 4, &RecommendOptions::default());

        // Pure declared-rating order: m2 (9.0) first.
        assert_eq!(results[0].item.id, "m2");
        assert_eq!(results[0].score, 9.0);
        assert!(results[0].breakdown.genre == 0.0);
    }

    #[test]
    fn test_cold_start_orders_by_declared_rating() {
        let results = cold_start(&catalog_fixture(), 10);
        let scores: Vec<f32> = results.iter().map(|c| c.score).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1], "scores must be descending");
        }
        // Unrated items score 0.
        let results = cold_start(&[Item::new("x", "Unrated")], 10);
        assert_eq!(results[0].score, 0.0);
    }

    #[test]
    fn test_more_like_this_excludes_reference_and_watched() {
        let reference = Item::new("ref", "Reference")
            .with_genres(&["Action"])
            .with_director("D");
        let twin = Item::new("twin", "Twin")
            .with_genres(&["Action"])
            .with_director("D");
        let watched_twin = Item::new("watched", "Watched Twin")
            .with_genres(&["Action"])
            .with_director("D");
        let unrelated = Item::new("other", "Other").with_genres(&["Romance"]);

        let mut profile = UserProfile::new();
        profile.record_view(&watched_twin, None, true, 1_000);

        let candidates = vec![
            reference.clone(),
            twin.clone(),
            watched_twin.clone(),
            unrelated,
        ];
        let results = more_like_this(&profile, &reference, &candidates, DEFAULT_SIMILAR_COUNT);

        assert!(results.iter().all(|c| c.item.id != "ref"));
        assert!(
            results.iter().all(|c| c.item.id != "watched"),
            "watched items are excluded even when most similar"
        );
        assert_eq!(results[0].item.id, "twin");
    }

    #[test]
    fn test_trending_uses_windowed_views_only() {
        let now = 100 * MS_PER_DAY;
        let mut profile = UserProfile::new();
        // Old drama view outside the window, recent action views inside it.
        profile.record_view(
            &Item::new("old", "Old Drama").with_genres(&["Drama"]),
            None,
            true,
            now - 30 * MS_PER_DAY,
        );
        profile.record_view(
            &Item::new("new1", "New Action").with_genres(&["Action"]),
            None,
            true,
            now - MS_PER_DAY,
        );
        profile.record_view(
            &Item::new("new2", "New Action 2").with_genres(&["Action"]),
            None,
            false,
            now,
        );

        let results = trending(&profile, &catalog_fixture(), 10, 7, now);

        // Action candidates carry the transient weight 1.0 + 0.5.
        assert_eq!(results[0].item.genres[0], "Action");
        assert!((results[0].score - 1.5).abs() < 1e-6);
        // Drama candidate scores 0 in the window.
        let drama = results.iter().find(|c| c.item.id == "m3").unwrap();
        assert_eq!(drama.score, 0.0);
    }

    #[test]
    fn test_trending_falls_back_without_recent_views() {
        let now = 100 * MS_PER_DAY;
        let mut profile = UserProfile::new();
        profile.record_view(
            &Item::new("old", "Old Action").with_genres(&["Action"]),
            None,
            true,
            now - 50 * MS_PER_DAY,
        );

        let results = trending(&profile, &catalog_fixture(), 10, 7, now);
        // Default mode kicks in: preference-based scores, not raw sums.
        assert!(!results.is_empty());
        assert!(results[0].score <= 1.0, "default mode scores are normalized blends");
    }

    #[test]
    fn test_by_genre_restricts_and_scores_fully() {
        let profile = profile_liking_action();
        let results = by_genre(&profile, "Action", &catalog_fixture(), 10);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|c| c.item.genres.contains(&"Action".to_string())));
        // Full combined score, so the rating boost separates the two.
        assert_eq!(results[0].item.id, "m2");
    }

    #[test]
    fn test_by_genre_excludes_watched() {
        let mut profile = profile_liking_action();
        let catalog = catalog_fixture();
        profile.record_view(&catalog[1], None, true, 2_000);

        let results = by_genre(&profile, "Action", &catalog, 10);
        assert!(results.iter().all(|c| c.item.id != "m2"));
    }
}
