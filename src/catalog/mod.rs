mod aggregator;
mod assets;
mod fallback;
mod franchise;
mod provider;
mod schedule;
mod search;
mod service;
mod similar;
mod types;


pub use aggregator::BatchAggregator;
pub use assets::{AssetKind, resolve};
pub use fallback::{UNTITLED, fallback_search, normalize_fallback_hit};
pub use franchise::{find_franchise, matches_franchise};
pub use provider::anilibria::{ANILIBRIA_API_URL, ANILIBRIA_CDN_URL};
pub use provider::kodik::{
    KODIK_API_URL, KodikAnime, KodikAnimePage, KodikListParams, KodikPage, KodikRelease,
    KodikSearchParams, MaterialData, Translation,
};
pub use provider::{
    AniLibriaProvider, AuthScheme, FallbackSource, HttpClient, KodikProvider, ReleaseSource,
};
pub use schedule::dedup_by_identity;
pub use search::{SearchEngine, matches};
pub use service::{CatalogConfig, CatalogService};
pub use similar::rank_by_genres;
pub use types::{
    AssetDescriptor, AssetVariant, CatalogItem, Episode, Franchise, Genre, ItemId, Provenance,
    ReleaseName, SearchFilter, Season, Torrent, Video,
};

use std::time::Duration;

/// Maximum items the upstream returns per call
pub const PAGE_SIZE: usize = 50;

/// Batch ceiling for a search that filters by genre
pub const GENRE_SEARCH_MAX_BATCHES: usize = 10;

/// Batch ceiling for a search without a genre filter
pub const PLAIN_SEARCH_MAX_BATCHES: usize = 2;

/// Extra accumulated matches beyond `offset + limit` before a search stops early
pub const EARLY_STOP_SLACK: usize = 50;

/// Batches aggregated into the similarity candidate pool
pub const SIMILAR_POOL_BATCHES: usize = 4;

/// Batches aggregated into the schedule snapshot
pub const SCHEDULE_BATCHES: usize = 5;

/// Size of the pool a random release is drawn from
pub const RANDOM_POOL_SIZE: usize = PAGE_SIZE;

/// Franchises scanned when resolving a franchise's releases
pub const FRANCHISE_POOL_SIZE: usize = 200;

/// Releases scanned when resolving a franchise's releases
pub const FRANCHISE_RELEASE_POOL_SIZE: usize = 500;

/// Per-call upstream timeout
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Upstream error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider not available: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// HTTP status this error is reported with
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) => 500,
            Self::Parse(_) => 502,
            Self::NotFound(_) => 404,
            Self::Config(_) => 500,
            Self::Unavailable(_) => 503,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
