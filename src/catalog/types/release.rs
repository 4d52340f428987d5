use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AssetDescriptor, Episode, Genre, lenient, lenient_vec};
use crate::catalog::assets::{AssetKind, resolve};

/// Which upstream provider produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Provenance {
    /// AniLibria catalog
    #[default]
    #[serde(rename = "anilibria")]
    Primary,
    /// Kodik mirror catalog
    #[serde(rename = "kodik")]
    Secondary,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "anilibria"),
            Self::Secondary => write!(f, "kodik"),
        }
    }
}

/// Upstream identifier, numeric for AniLibria and often textual elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(i64),
    Text(String),
}

impl ItemId {
    /// Numeric value, parsing textual ids that hold a number
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Loose comparison key: the id rendered as a string
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Release display names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseName {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReleaseName {
    pub fn main(name: impl Into<String>) -> Self {
        Self {
            main: Some(name.into()),
            ..Default::default()
        }
    }

    /// All known variants in main, english, alternative order
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        [&self.main, &self.english, &self.alternative]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// Airing season, e.g. `{ "value": "winter", "description": "Зима" }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A release from either catalog.
///
/// Typed fields drive filtering and ranking; everything else the upstream
/// sent is kept in `extra` and passed through untouched. `poster_url` and
/// `similarity_score` are derived per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<ReleaseName>,
    #[serde(default, deserialize_with = "lenient")]
    pub alias: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub poster: Option<AssetDescriptor>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub latest_episode: Option<Episode>,

    // Franchise linkage is not normalized upstream.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub franchise_id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub franchise: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub franchise_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<usize>,
    #[serde(default, skip_deserializing)]
    pub source: Provenance,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Create a new item with required fields
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            alias: None,
            year: None,
            season: None,
            genres: Vec::new(),
            poster: None,
            latest_episode: None,
            franchise_id: None,
            franchise: None,
            franchise_name: None,
            poster_url: None,
            similarity_score: None,
            source: Provenance::Primary,
            extra: Map::new(),
        }
    }

    /// Builder pattern: set main name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(ReleaseName::main(name));
        self
    }

    /// Builder pattern: set alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Builder pattern: set year
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Builder pattern: set season
    pub fn with_season(mut self, value: Option<&str>, description: Option<&str>) -> Self {
        self.season = Some(Season {
            value: value.map(str::to_string),
            description: description.map(str::to_string),
        });
        self
    }

    /// Builder pattern: set genres by id
    pub fn with_genre_ids(mut self, ids: &[i64]) -> Self {
        self.genres = ids.iter().map(|id| Genre::with_id(*id)).collect();
        self
    }

    /// Builder pattern: set poster descriptor
    pub fn with_poster(mut self, poster: AssetDescriptor) -> Self {
        self.poster = Some(poster);
        self
    }

    /// Numeric genre ids attached to this release
    pub fn genre_ids(&self) -> Vec<i64> {
        self.genres.iter().filter_map(|genre| genre.id).collect()
    }

    /// Lowercased text searched by free-text queries: every name variant and the alias
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = self
            .name
            .as_ref()
            .map(|name| name.variants().collect())
            .unwrap_or_default();
        if let Some(ref alias) = self.alias {
            parts.push(alias);
        }
        parts.join(" ").to_lowercase()
    }

    /// Resolve asset URLs against the CDN base. Safe to call repeatedly.
    pub fn decorate(&mut self, cdn_base: &str) {
        self.poster_url = resolve(self.poster.as_ref(), AssetKind::Poster, cdn_base);
        if let Some(ref mut episode) = self.latest_episode {
            episode.decorate(cdn_base);
        }
    }
}
