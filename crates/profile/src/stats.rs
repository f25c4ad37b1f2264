//! Derived, read-only statistics over a user profile.

use crate::profile::UserProfile;
use catalog::{Item, MS_PER_DAY};
use serde::{Deserialize, Serialize};

/// How many values to report per category in the statistics view.
const TOP_CATEGORY_COUNT: usize = 3;

/// Snapshot of viewing behaviour, computed on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileStatistics {
    pub total_views: usize,
    pub unique_items_watched: usize,
    pub ratings_count: usize,
    /// Mean of all ratings, rounded to one decimal; 0 when nothing is rated.
    pub average_rating: f32,
    pub top_genres: Vec<(String, f32)>,
    pub top_actors: Vec<(String, f32)>,
    pub top_directors: Vec<(String, f32)>,
    /// Most-recent run of views that are each at most one day apart.
    pub viewing_streak: usize,
    pub last_viewed: Option<Item>,
}

/// Compute the full statistics snapshot for a profile.
pub fn compute_statistics(profile: &UserProfile) -> ProfileStatistics {
    let ratings = profile.ratings();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        let total: f32 = ratings.values().map(|r| r.rating).sum();
        round_to_tenth(total / ratings.len() as f32)
    };

    let prefs = profile.preferences();

    ProfileStatistics {
        total_views: profile.history().len(),
        unique_items_watched: profile.watched().len(),
        ratings_count: ratings.len(),
        average_rating,
        top_genres: prefs.top_genres(TOP_CATEGORY_COUNT),
        top_actors: prefs.top_actors(TOP_CATEGORY_COUNT),
        top_directors: prefs.top_directors(TOP_CATEGORY_COUNT),
        viewing_streak: viewing_streak(profile),
        last_viewed: profile.history().last().map(|event| event.item.clone()),
    }
}

/// Count the most-recent consecutive views that are each no more than one
/// day apart, newest first, stopping at the first larger gap.
fn viewing_streak(profile: &UserProfile) -> usize {
    let mut timestamps: Vec<i64> = profile
        .history()
        .iter()
        .map(|event| event.timestamp)
        .collect();
    if timestamps.is_empty() {
        return 0;
    }
    timestamps.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 1;
    for pair in timestamps.windows(2) {
        if pair[0] - pair[1] <= MS_PER_DAY {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
