//! # Catalog Crate
//!
//! Domain types for catalog items and feedback events, plus a JSON catalog
//! loader.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (`Item`, `ViewEvent`, `RatingEntry`)
//! - **loader**: Parse catalog JSON files into `Vec<Item>`
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::load_catalog;
//! use std::path::Path;
//!
//! let items = load_catalog(Path::new("catalog.json"))?;
//! println!("Loaded {} items", items.len());
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use loader::{load_catalog, parse_catalog};
pub use types::{decade_of, Item, ItemId, RatingEntry, ViewEvent, MS_PER_DAY};
