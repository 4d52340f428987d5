use crate::catalog::{
    BatchAggregator, EARLY_STOP_SLACK, GENRE_SEARCH_MAX_BATCHES, PLAIN_SEARCH_MAX_BATCHES, Result,
    provider::ReleaseSource,
    types::{CatalogItem, SearchFilter},
};
use std::ops::ControlFlow;
use tracing::debug;

/// Client-side filtering over the latest-releases listing.
///
/// The upstream listing cannot filter, so the engine pages through it and
/// applies the predicates itself. How far it looks is a heuristic, not a
/// completeness guarantee:
///
/// - at most [`GENRE_SEARCH_MAX_BATCHES`] batches with a genre filter and
///   [`PLAIN_SEARCH_MAX_BATCHES`] without one, so matches past that depth
///   are never seen;
/// - paging stops once `offset + limit + EARLY_STOP_SLACK` matches are held,
///   which can under-count near the tail of very large result sets.
pub struct SearchEngine<'a> {
    source: &'a dyn ReleaseSource,
    aggregator: BatchAggregator,
    cdn_base: &'a str,
}

impl<'a> SearchEngine<'a> {
    pub fn new(source: &'a dyn ReleaseSource, aggregator: BatchAggregator, cdn_base: &'a str) -> Self {
        Self {
            source,
            aggregator,
            cdn_base,
        }
    }

    /// Batch ceiling for a filter
    pub fn max_batches(filter: &SearchFilter) -> usize {
        if filter.genres.is_empty() {
            PLAIN_SEARCH_MAX_BATCHES
        } else {
            GENRE_SEARCH_MAX_BATCHES
        }
    }

    /// Matches in `[offset, offset + limit)` of the filtered listing
    pub async fn search(
        &self,
        filter: &SearchFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>> {
        self.search_with_ceiling(filter, limit, offset, Self::max_batches(filter))
            .await
    }

    pub async fn search_with_ceiling(
        &self,
        filter: &SearchFilter,
        limit: usize,
        offset: usize,
        max_batches: usize,
    ) -> Result<Vec<CatalogItem>> {
        let enough = offset.saturating_add(limit).saturating_add(EARLY_STOP_SLACK);
        let mut matched: Vec<CatalogItem> = Vec::new();

        let calls = self
            .aggregator
            .scan(
                max_batches,
                |page, at| self.source.latest_releases(page, at),
                |batch| {
                    for mut item in batch {
                        if matches(filter, &item) {
                            item.decorate(self.cdn_base);
                            matched.push(item);
                        }
                    }
                    if matched.len() >= enough {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                },
            )
            .await?;

        debug!(
            "Search matched {} items in {} batches (ceiling {})",
            matched.len(),
            calls,
            max_batches
        );

        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }
}

/// Apply the filter predicates in order: text, year, season, genre
pub fn matches(filter: &SearchFilter, item: &CatalogItem) -> bool {
    if let Some(query) = filter.text_query()
        && !item.search_text().contains(&query.to_lowercase())
    {
        return false;
    }

    if let Some(year) = filter.year
        && item.year != Some(year)
    {
        return false;
    }

    if let Some(ref season) = filter.season
        && !season_matches(item, season)
    {
        return false;
    }

    if filter.has_genres() {
        let ids = item.genre_ids();
        if !filter.genres.iter().any(|genre| ids.contains(genre)) {
            return false;
        }
    }

    true
}

/// Season token against `value`, then `description`, case-insensitively
fn season_matches(item: &CatalogItem, token: &str) -> bool {
    let Some(ref season) = item.season else {
        return false;
    };
    let token = token.to_lowercase();

    [&season.value, &season.description]
        .into_iter()
        .flatten()
        .any(|candidate| candidate.to_lowercase() == token)
}
