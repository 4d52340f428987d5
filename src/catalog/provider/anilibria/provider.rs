use crate::catalog::{
    Result,
    provider::{HttpClient, ReleaseSource, parse_records},
    types::{CatalogItem, Episode, Franchise, Genre, Torrent, Video},
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const ANILIBRIA_API_URL: &str = "https://api.anilibria.app/api/v1";
pub const ANILIBRIA_CDN_URL: &str = "https://anilibria.top";

const PROVIDER: &str = "AniLibria";

pub struct AniLibriaProvider {
    client: HttpClient,
}

impl Default for AniLibriaProvider {
    fn default() -> Self {
        Self::new(ANILIBRIA_API_URL)
    }
}

impl AniLibriaProvider {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(PROVIDER, api_base),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        kind: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let values: Vec<Value> = self.client.get(endpoint, params).await?;
        Ok(parse_records(PROVIDER, kind, values))
    }
}

fn page_params(limit: usize, offset: usize) -> [(&'static str, String); 2] {
    [("limit", limit.to_string()), ("offset", offset.to_string())]
}

#[async_trait]
impl ReleaseSource for AniLibriaProvider {
    fn id(&self) -> &'static str {
        "anilibria"
    }

    async fn latest_releases(&self, limit: usize, offset: usize) -> Result<Vec<CatalogItem>> {
        self.list("/anime/releases/latest", "release", &page_params(limit, offset))
            .await
    }

    async fn release(&self, id: i64) -> Result<CatalogItem> {
        self.client
            .get(&format!("/anime/releases/{id}"), &[])
            .await
    }

    async fn release_by_alias(&self, alias: &str) -> Result<CatalogItem> {
        self.client
            .get(
                &format!("/anime/releases/alias/{}", urlencoding::encode(alias)),
                &[],
            )
            .await
    }

    async fn episodes(&self, release_id: i64) -> Result<Vec<Episode>> {
        self.list(
            &format!("/anime/releases/{release_id}/episodes"),
            "episode",
            &[],
        )
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        self.list("/anime/catalog/references/genres", "genre", &[])
            .await
    }

    async fn franchises(&self, limit: usize, offset: usize) -> Result<Vec<Franchise>> {
        self.list("/anime/franchises", "franchise", &page_params(limit, offset))
            .await
    }

    async fn torrents(&self, limit: usize, offset: usize) -> Result<Vec<Torrent>> {
        self.list("/anime/torrents", "torrent", &page_params(limit, offset))
            .await
    }

    async fn videos(&self, limit: usize, offset: usize) -> Result<Vec<Video>> {
        self.list("/media/videos/latest", "video", &page_params(limit, offset))
            .await
    }

    fn close(&self) {
        self.client.close();
    }
}
