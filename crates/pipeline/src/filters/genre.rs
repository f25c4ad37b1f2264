//! Filter to keep only items carrying a specific genre.

use crate::traits::Filter;
use catalog::Item;
use profile::UserProfile;

/// Keeps only candidates whose genre list contains the requested genre.
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a Item>,
        _profile: &UserProfile,
    ) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| item.genres.iter().any(|g| g == &self.genre))
            .collect()
    }
}
