//! # Profile Crate
//!
//! Per-user state for the personalization engine: the preference
//! accumulators, the viewing history with its watched set and ratings, and
//! derived statistics.
//!
//! ## Components
//!
//! ### PreferenceStore
//! Six monotonic accumulators (genre, actor, director, theme, source,
//! decade) mapping attribute values to weights. Weights only grow; the
//! scorer normalizes them into shares at read time.
//!
//! ### UserProfile
//! Owns the ordered `ViewEvent` history, the watched-id set, and the rating
//! entries, and translates feedback into preference updates:
//! - a completed view adds weight 1.0, a partial view 0.5
//! - a rating adds weight `rating / 10`, but only when the item appears in
//!   the viewing history
//!
//! ### Statistics
//! An on-demand snapshot: view counts, average rating, top categories,
//! viewing streak, and the most recently viewed item.

// Public modules
pub mod preferences;
pub mod profile;
pub mod stats;

// Re-export commonly used types
pub use preferences::PreferenceStore;
pub use profile::{UserProfile, COMPLETED_VIEW_WEIGHT, PARTIAL_VIEW_WEIGHT};
pub use stats::{compute_statistics, ProfileStatistics};
