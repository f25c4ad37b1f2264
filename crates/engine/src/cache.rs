//! Time-bounded memoization of the last default recommendation run.
//!
//! A pure TTL memo: an entry is valid while it exists and is younger than
//! five minutes. Any preference-affecting mutation clears it immediately,
//! regardless of the TTL. Only the default recommendation mode is cached;
//! the specialized modes always recompute.

use pipeline::ScoredCandidate;

/// How long a cached recommendation list stays valid.
pub const CACHE_TTL_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    results: Vec<ScoredCandidate>,
    stored_at: i64,
}

/// Holds the last computed, diversity-filtered recommendation list.
#[derive(Debug, Default)]
pub struct RecommendationCache {
    entry: Option<CacheEntry>,
}

impl RecommendationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached list, if present and within its TTL.
    pub fn get(&self, now_ms: i64) -> Option<&[ScoredCandidate]> {
        match &self.entry {
            Some(entry) if now_ms - entry.stored_at < CACHE_TTL_MS => {
                Some(&entry.results)
            }
            _ => None,
        }
    }

    pub fn store(&mut self, results: Vec<ScoredCandidate>, now_ms: i64) {
        self.entry = Some(CacheEntry {
            results,
            stored_at: now_ms,
        });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
