//! Filter to enforce a minimum declared quality rating.

use crate::traits::Filter;
use catalog::Item;
use profile::UserProfile;

/// Removes candidates whose declared rating falls below a threshold.
///
/// Items with no declared rating are treated as rating 0 and excluded
/// whenever a positive threshold is in effect.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Minimum declared rating on the 0-10 scale
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Item>,
        _profile: &UserProfile,
    ) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| item.rating.unwrap_or(0.0) >= self.min_rating)
            .collect()
    }
}
