use crate::catalog::{
    BatchAggregator, CatalogError, FRANCHISE_POOL_SIZE, FRANCHISE_RELEASE_POOL_SIZE, PAGE_SIZE,
    RANDOM_POOL_SIZE, Result, SCHEDULE_BATCHES, SIMILAR_POOL_BATCHES,
    fallback::fallback_search,
    franchise::{find_franchise, matches_franchise},
    provider::{
        FallbackSource, ReleaseSource,
        anilibria::ANILIBRIA_CDN_URL,
        kodik::{KodikAnime, KodikAnimePage, KodikListParams, KodikSearchParams},
    },
    schedule::dedup_by_identity,
    search::SearchEngine,
    similar::rank_by_genres,
    types::{CatalogItem, Episode, Franchise, Genre, SearchFilter, Torrent, Video},
};
use rand::seq::IndexedRandom;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Catalog service configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base prepended to relative asset paths
    pub cdn_base: String,
    /// Upstream per-call item cap
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cdn_base: ANILIBRIA_CDN_URL.to_string(),
            page_size: PAGE_SIZE,
        }
    }
}

/// Aggregating front for the primary catalog with an optional secondary
/// catalog to fall back on.
///
/// Holds no per-request state; every call builds its own accumulators.
pub struct CatalogService {
    releases: Arc<dyn ReleaseSource>,
    fallback: Option<Arc<dyn FallbackSource>>,
    aggregator: BatchAggregator,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(releases: Arc<dyn ReleaseSource>, config: CatalogConfig) -> Self {
        Self {
            releases,
            fallback: None,
            aggregator: BatchAggregator::new(config.page_size),
            config,
        }
    }

    /// Builder pattern: attach the secondary catalog
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn cdn_base(&self) -> &str {
        &self.config.cdn_base
    }

    fn decorate_all(&self, mut items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        for item in &mut items {
            item.decorate(&self.config.cdn_base);
        }
        items
    }

    fn fallback_source(&self) -> Result<&dyn FallbackSource> {
        self.fallback
            .as_deref()
            .ok_or_else(|| CatalogError::Unavailable("secondary provider is disabled".to_string()))
    }

    /// Latest releases; `limit` may exceed the upstream page cap
    pub async fn latest_releases(&self, limit: usize, offset: usize) -> Result<Vec<CatalogItem>> {
        let items = self
            .aggregator
            .fetch_n(limit, offset, |page, at| self.releases.latest_releases(page, at))
            .await?;
        Ok(self.decorate_all(items))
    }

    pub async fn release(&self, id: i64) -> Result<CatalogItem> {
        let mut item = self.releases.release(id).await?;
        item.decorate(&self.config.cdn_base);
        Ok(item)
    }

    pub async fn release_by_alias(&self, alias: &str) -> Result<CatalogItem> {
        let mut item = self.releases.release_by_alias(alias).await?;
        item.decorate(&self.config.cdn_base);
        Ok(item)
    }

    pub async fn episodes(&self, release_id: i64) -> Result<Vec<Episode>> {
        let mut episodes = self.releases.episodes(release_id).await?;
        for episode in &mut episodes {
            episode.decorate(&self.config.cdn_base);
        }
        Ok(episodes)
    }

    /// Primary-catalog search only
    pub async fn search(
        &self,
        filter: &SearchFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>> {
        SearchEngine::new(self.releases.as_ref(), self.aggregator, &self.config.cdn_base)
            .search(filter, limit, offset)
            .await
    }

    /// Search the primary catalog, and the secondary one by title when the
    /// primary finds nothing for a free-text query.
    ///
    /// A failing secondary search leaves the (empty) primary result in place.
    pub async fn search_with_fallback(
        &self,
        filter: &SearchFilter,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>> {
        let releases = self.search(filter, limit, offset).await?;
        if !releases.is_empty() {
            return Ok(releases);
        }

        let (Some(query), Some(fallback)) = (filter.text_query(), self.fallback.as_deref()) else {
            return Ok(releases);
        };

        info!("No primary results for '{}', trying {}", query, fallback.id());
        match fallback_search(fallback, query, limit).await {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Fallback search on {} failed: {}", fallback.id(), e);
                Ok(releases)
            }
        }
    }

    /// Releases sharing the most genres with the reference release
    pub async fn similar_releases(&self, release_id: i64, limit: usize) -> Result<Vec<CatalogItem>> {
        let reference = self.releases.release(release_id).await?;
        let reference_genres = reference.genre_ids();
        if reference_genres.is_empty() {
            debug!("Release {} has no genres, nothing to compare", release_id);
            return Ok(Vec::new());
        }

        let pool_size = SIMILAR_POOL_BATCHES * self.aggregator.page_size();
        let candidates = self
            .aggregator
            .fetch_n(pool_size, 0, |page, at| self.releases.latest_releases(page, at))
            .await?;

        let ranked = rank_by_genres(&reference.id, &reference_genres, candidates, limit);
        Ok(self.decorate_all(ranked))
    }

    /// Deduplicated snapshot of the catalog head
    pub async fn schedule(&self) -> Result<Vec<CatalogItem>> {
        let snapshot_size = SCHEDULE_BATCHES * self.aggregator.page_size();
        let items = self
            .aggregator
            .fetch_n(snapshot_size, 0, |page, at| self.releases.latest_releases(page, at))
            .await?;

        Ok(self.decorate_all(dedup_by_identity(items)))
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let mut genres = self.releases.genres().await?;
        for genre in &mut genres {
            genre.decorate(&self.config.cdn_base);
        }
        Ok(genres)
    }

    /// A release drawn uniformly from the latest batch
    pub async fn random_release(&self) -> Result<CatalogItem> {
        let pool = self
            .releases
            .latest_releases(RANDOM_POOL_SIZE.min(self.aggregator.page_size()), 0)
            .await?;

        let picked = {
            let mut rng = rand::rng();
            pool.choose(&mut rng).map(|item| item.id.clone())
        };
        let id = picked
            .as_ref()
            .and_then(|id| id.as_numeric())
            .ok_or_else(|| CatalogError::NotFound("Random release id is missing".to_string()))?;

        self.release(id).await
    }

    pub async fn franchises(&self, limit: usize, offset: usize) -> Result<Vec<Franchise>> {
        let mut franchises = self
            .aggregator
            .fetch_n(limit, offset, |page, at| self.releases.franchises(page, at))
            .await?;
        for franchise in &mut franchises {
            franchise.decorate(&self.config.cdn_base);
        }
        Ok(franchises)
    }

    /// Releases linked to a franchise; unknown franchises have none
    pub async fn franchise_releases(&self, franchise_id: &str) -> Result<Vec<CatalogItem>> {
        let franchises = self
            .aggregator
            .fetch_n(FRANCHISE_POOL_SIZE, 0, |page, at| self.releases.franchises(page, at))
            .await?;

        let Some(franchise) = find_franchise(&franchises, franchise_id) else {
            debug!("Franchise {} not found in the pool", franchise_id);
            return Ok(Vec::new());
        };

        let releases = self
            .aggregator
            .fetch_n(FRANCHISE_RELEASE_POOL_SIZE, 0, |page, at| {
                self.releases.latest_releases(page, at)
            })
            .await?;

        let matched: Vec<CatalogItem> = releases
            .into_iter()
            .filter(|release| matches_franchise(franchise, release))
            .collect();

        Ok(self.decorate_all(matched))
    }

    pub async fn torrents(&self, limit: usize, offset: usize) -> Result<Vec<Torrent>> {
        let mut torrents = self
            .aggregator
            .fetch_n(limit, offset, |page, at| self.releases.torrents(page, at))
            .await?;
        for torrent in &mut torrents {
            torrent.decorate(&self.config.cdn_base);
        }
        Ok(torrents)
    }

    pub async fn videos(&self, limit: usize, offset: usize) -> Result<Vec<Video>> {
        let mut videos = self
            .aggregator
            .fetch_n(limit, offset, |page, at| self.releases.videos(page, at))
            .await?;
        for video in &mut videos {
            video.decorate(&self.config.cdn_base);
        }
        Ok(videos)
    }

    /// Direct search on the secondary catalog
    pub async fn kodik_search(&self, params: &KodikSearchParams) -> Result<KodikAnimePage> {
        let page = self.fallback_source()?.search(params).await?;
        Ok(page.into())
    }

    pub async fn kodik_anime(&self, shikimori_id: &str) -> Result<KodikAnime> {
        let release = self.fallback_source()?.by_shikimori_id(shikimori_id).await?;
        Ok(release.into())
    }

    pub async fn kodik_list(&self, params: &KodikListParams) -> Result<KodikAnimePage> {
        let page = self.fallback_source()?.list(params).await?;
        Ok(page.into())
    }

    /// Close upstream connection pools
    pub fn shutdown(&self) {
        self.releases.close();
        if let Some(ref fallback) = self.fallback {
            fallback.close();
        }
        info!("Catalog service shut down");
    }
}
