//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod genre;
pub mod min_rating;
pub mod watched;

// Re-export for convenience
pub use genre::GenreFilter;
pub use min_rating::MinimumRatingFilter;
pub use watched::ExcludeWatchedFilter;
