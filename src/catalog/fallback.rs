use crate::catalog::{
    Result,
    provider::FallbackSource,
    provider::kodik::{KodikAnime, KodikSearchParams},
    types::{CatalogItem, Genre, ItemId, Provenance, ReleaseName},
};
use serde_json::Value;
use tracing::{info, warn};

/// Display name for hits without a title
pub const UNTITLED: &str = "untitled";

/// Search the secondary catalog by raw title and reshape hits as catalog items
pub async fn fallback_search(
    source: &dyn FallbackSource,
    title: &str,
    limit: usize,
) -> Result<Vec<CatalogItem>> {
    let params = KodikSearchParams::by_title(title).with_limit(limit);
    let page = source.search(&params).await?;

    let items: Vec<CatalogItem> = page
        .results
        .into_iter()
        .map(KodikAnime::from)
        .filter_map(|hit| {
            let item = normalize_fallback_hit(hit);
            if item.is_none() {
                warn!("Skipping {} hit without an id", source.id());
            }
            item
        })
        .collect();

    info!(
        "Fallback search on {} for '{}' returned {} items",
        source.id(),
        title,
        items.len()
    );
    Ok(items)
}

/// Reshape a secondary-catalog hit into a catalog item.
///
/// The Shikimori cross-reference id is preferred over Kodik's own id; hits
/// with neither are dropped. The poster URL is already absolute. Genres
/// carry names only, so these items cannot be ranked for similarity.
pub fn normalize_fallback_hit(hit: KodikAnime) -> Option<CatalogItem> {
    let id = hit
        .shikimori_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .map(|id| match id.trim().parse::<i64>() {
            Ok(numeric) => ItemId::Numeric(numeric),
            Err(_) => ItemId::Text(id.to_string()),
        })
        .or_else(|| hit.id.clone().filter(|id| !id.is_empty()).map(ItemId::Text))?;

    let title = hit
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let mut item = CatalogItem::new(id).with_year(hit.year);
    item.name = Some(ReleaseName::main(title));
    item.poster_url = hit.poster_url;
    item.genres = hit.genres.into_iter().map(Genre::with_name).collect();
    item.source = Provenance::Secondary;

    item.extra.insert("type".to_string(), Value::from("Kodik"));
    item.extra.insert(
        "description".to_string(),
        hit.description.map_or(Value::Null, Value::from),
    );
    item.extra
        .insert("player_link".to_string(), Value::from(hit.player_link));
    item.extra.insert(
        "original_title".to_string(),
        Value::from(hit.title_orig.unwrap_or_default()),
    );

    Some(item)
}
