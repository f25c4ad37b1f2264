//! Error types for catalog loading.

use thiserror::Error;

/// Errors that can occur while loading and validating a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid JSON for a list of items
    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two items in the catalog share the same id
    #[error("Duplicate item id: {id}")]
    DuplicateItem { id: String },

    /// A declared rating was outside the 0-10 scale
    #[error("Invalid rating {value} for item {id}: must be within 0-10")]
    InvalidRating { id: String, value: f32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
