//! Filter to remove items the user has already viewed.
//!
//! Typically the first filter in the pipeline, as there's no point in
//! recommending items the user has already seen.

use crate::traits::Filter;
use catalog::Item;
use profile::UserProfile;

/// Removes candidates that appear in the user's watched set.
///
/// ## Algorithm
/// Uses the HashSet in `UserProfile` for O(1) lookups.
pub struct ExcludeWatchedFilter;

impl Filter for ExcludeWatchedFilter {
    fn name(&self) -> &str {
        "ExcludeWatchedFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Item>,
        profile: &UserProfile,
    ) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| !profile.is_watched(&item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_watched_filter() {
        let mut profile = UserProfile::new();
        let watched = Item::new("m1", "Seen");
        profile.record_view(&watched, None, true, 1_000);

        let fresh = Item::new("m2", "Fresh");
        let candidates = vec![&watched, &fresh];

        let filter = ExcludeWatchedFilter;
        let filtered = filter.apply(candidates, &profile);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "m2");
    }
}
