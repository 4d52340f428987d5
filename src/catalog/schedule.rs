use crate::catalog::types::{CatalogItem, ItemId};
use std::collections::HashSet;
use tracing::debug;

/// Keep the first occurrence of each identity, preserving order.
///
/// Overlapping pages are expected when the upstream listing shifts between
/// calls; repeats are dropped without error.
pub fn dedup_by_identity(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let total = items.len();
    let mut seen: HashSet<ItemId> = HashSet::with_capacity(total);

    let unique: Vec<CatalogItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if unique.len() < total {
        debug!("Dropped {} duplicate releases", total - unique.len());
    }

    unique
}
