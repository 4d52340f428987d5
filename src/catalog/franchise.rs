use crate::catalog::types::{CatalogItem, Franchise, ItemId};

/// Whether a release belongs to a franchise.
///
/// The upstream has no authoritative link field, so three conventions are
/// tried in order: an explicit `franchise_id`, a `franchise` field holding
/// the id, then a name match against `franchise_name` or a textual
/// `franchise` (trimmed, case-insensitive).
pub fn matches_franchise(franchise: &Franchise, release: &CatalogItem) -> bool {
    let franchise_key = franchise.id.as_key();

    if release
        .franchise_id
        .as_ref()
        .is_some_and(|id| id.as_key() == franchise_key)
    {
        return true;
    }

    if release
        .franchise
        .as_ref()
        .is_some_and(|id| id.as_key() == franchise_key)
    {
        return true;
    }

    let Some(name) = franchise
        .name
        .as_deref()
        .map(normalize_name)
        .filter(|name| !name.is_empty())
    else {
        return false;
    };

    if release
        .franchise_name
        .as_deref()
        .is_some_and(|candidate| normalize_name(candidate) == name)
    {
        return true;
    }

    matches!(&release.franchise, Some(ItemId::Text(candidate)) if normalize_name(candidate) == name)
}

/// Locate a franchise by id, compared as strings
pub fn find_franchise<'a>(franchises: &'a [Franchise], id: &str) -> Option<&'a Franchise> {
    franchises
        .iter()
        .find(|franchise| franchise.id.as_key() == id.trim())
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
