//! # Engine Crate
//!
//! Stateful facade over the personalization pipeline. Owns the user
//! profile, memoizes default-mode recommendations for five minutes, and
//! writes every state change through a pluggable key-value store.
//!
//! ## Components
//! - `PersonalizationEngine`: the facade tying feedback, ranking,
//!   caching, and persistence together
//! - `Clock`: swappable time source for deterministic tests
//! - `RecommendationCache`: single-slot TTL cache
//! - `StateStore`: key-value persistence seam with in-memory and
//!   JSON-file backends

pub mod cache;
pub mod clock;
pub mod engine;
pub mod storage;

pub use cache::{RecommendationCache, CACHE_TTL_MS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{ExportData, PersonalizationEngine};
pub use storage::{
    JsonFileStore, MemoryStore, PersistedState, StateStore, StorageError, STATE_KEY,
};
