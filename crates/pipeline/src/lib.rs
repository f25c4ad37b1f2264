//! Pipeline for filtering, scoring, and ranking candidate items.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Scorer for combining per-category preference shares into one score
//! - Ranker functions for the recommendation modes
//! - Diversity re-selection over score-sorted lists
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (already watched, low declared rating)
//! 2. The scorer computes a normalized per-category breakdown and blends it
//!    with fixed weights into one relevance score
//! 3. The ranker sorts by score and hands the list to the diversity filter
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{recommend, RecommendOptions};
//!
//! let results = recommend(&profile, &candidates, 10, &RecommendOptions::default());
//! for candidate in results {
//!     println!("{} -> {:.3}", candidate.item.title, candidate.score);
//! }
//! ```

pub mod diversity;
pub mod filter_pipeline;
pub mod filters;
pub mod ranker;
pub mod scorer;
pub mod similarity;
pub mod traits;

// Re-export main types
pub use diversity::{apply_diversity_filter, MIN_GUARANTEED_RESULTS};
pub use filter_pipeline::FilterPipeline;
pub use ranker::{
    by_genre, cold_start, more_like_this, recommend, trending, RecommendOptions,
    COLD_START_DIVERSITY_FACTOR, DEFAULT_SIMILAR_COUNT, DEFAULT_TRENDING_COUNT,
    DEFAULT_TRENDING_WINDOW_DAYS,
};
pub use scorer::{score_item, ScoreBreakdown, ScoredCandidate};
pub use similarity::similarity_score;
pub use traits::Filter;
