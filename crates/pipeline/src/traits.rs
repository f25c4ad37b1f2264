//! Core traits for the candidate filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use catalog::Item;
use profile::UserProfile;

/// Core trait for filtering candidate items.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// Candidates are borrowed from the caller-supplied catalog, so filters pass
/// `Vec<&Item>` through rather than cloning items at every stage.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - Borrowed candidates to filter (takes ownership of the Vec)
    /// * `profile` - User profile containing watched set and preferences
    ///
    /// # Returns
    /// The surviving candidates
    fn apply<'a>(
        &self,
        candidates: Vec<&'a Item>,
        profile: &UserProfile,
    ) -> Vec<&'a Item>;
}
