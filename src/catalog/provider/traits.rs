use crate::catalog::{
    Result,
    provider::kodik::{KodikListParams, KodikPage, KodikRelease, KodikSearchParams},
    types::{CatalogItem, Episode, Franchise, Genre, Torrent, Video},
};
use async_trait::async_trait;

/// Primary catalog: paginated release listings and lookups.
///
/// Paged methods return at most [`PAGE_SIZE`](crate::catalog::PAGE_SIZE)
/// records per call. Records come back undecorated.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Provider identifier (e.g., "anilibria")
    fn id(&self) -> &'static str;

    /// Latest releases, newest first
    async fn latest_releases(&self, limit: usize, offset: usize) -> Result<Vec<CatalogItem>>;

    /// Release by numeric id
    async fn release(&self, id: i64) -> Result<CatalogItem>;

    /// Release by its URL alias
    async fn release_by_alias(&self, alias: &str) -> Result<CatalogItem>;

    /// Episodes of a release
    async fn episodes(&self, release_id: i64) -> Result<Vec<Episode>>;

    /// Genre reference list
    async fn genres(&self) -> Result<Vec<Genre>>;

    async fn franchises(&self, limit: usize, offset: usize) -> Result<Vec<Franchise>>;

    async fn torrents(&self, limit: usize, offset: usize) -> Result<Vec<Torrent>>;

    async fn videos(&self, limit: usize, offset: usize) -> Result<Vec<Video>>;

    /// Close pooled connections
    fn close(&self) {}
}

/// Secondary catalog searched when the primary has nothing
#[async_trait]
pub trait FallbackSource: Send + Sync {
    /// Provider identifier (e.g., "kodik")
    fn id(&self) -> &'static str;

    /// Search by title and/or cross-reference id
    async fn search(&self, params: &KodikSearchParams) -> Result<KodikPage>;

    /// Paged listing, most recently updated first
    async fn list(&self, params: &KodikListParams) -> Result<KodikPage>;

    /// First hit for a Shikimori id
    async fn by_shikimori_id(&self, shikimori_id: &str) -> Result<KodikRelease> {
        let params = KodikSearchParams::by_shikimori_id(shikimori_id).with_limit(1);
        self.search(&params)
            .await?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| {
                crate::catalog::CatalogError::NotFound(format!(
                    "Anime not found on {}: {shikimori_id}",
                    self.id()
                ))
            })
    }

    fn close(&self) {}
}
