//! Loading catalogs from JSON files.
//!
//! A catalog file is a JSON array of items. The loader validates ids and
//! rating ranges up front so the rest of the system can assume a clean
//! candidate set.

use crate::error::{CatalogError, Result};
use crate::types::Item;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load and validate a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<Item>> {
    let contents = fs::read_to_string(path)?;
    let items = parse_catalog(&contents)?;
    info!("Loaded {} catalog items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse and validate a catalog from a JSON string.
///
/// Validation rules:
/// - item ids must be unique
/// - declared ratings must be within the 0-10 scale
pub fn parse_catalog(json: &str) -> Result<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(json)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateItem {
                id: item.id.clone(),
            });
        }
        if let Some(rating) = item.rating {
            if !(0.0..=10.0).contains(&rating) {
                return Err(CatalogError::InvalidRating {
                    id: item.id.clone(),
                    value: rating,
                });
            }
        }
    }

    Ok(items)
}
