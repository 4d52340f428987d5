use crate::catalog::types::{Provenance, lenient, lenient_vec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of `/search` or `/list` results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KodikPage {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub results: Vec<KodikRelease>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub prev_page: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KodikRelease {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub release_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_orig: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub episodes_count: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub shikimori_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub translation: Option<Translation>,
    #[serde(default, deserialize_with = "lenient")]
    pub material_data: Option<MaterialData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub translation_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialData {
    #[serde(default, deserialize_with = "lenient")]
    pub shikimori_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title_en: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub episodes_total: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub poster_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub screenshots: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub anime_genres: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub shikimori_rating: Option<f64>,
}

/// Flattened view of a Kodik result served by the `/kodik` endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KodikAnime {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub release_type: Option<String>,
    pub title: Option<String>,
    pub title_orig: Option<String>,
    pub shikimori_id: Option<String>,
    pub year: Option<i32>,
    pub episodes_count: Option<i32>,
    pub poster_url: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub rating_shikimori: Option<f64>,
    pub player_link: String,
    pub translations: Vec<Translation>,
    pub quality: Option<String>,
    pub source: Provenance,
}

impl From<KodikRelease> for KodikAnime {
    fn from(release: KodikRelease) -> Self {
        let material = release.material_data.unwrap_or_default();

        // Dedicated poster first, then the first screenshot
        let poster_url = material
            .poster_url
            .filter(|url| !url.is_empty())
            .or_else(|| material.screenshots.into_iter().next());

        Self {
            id: release.id,
            release_type: release.release_type,
            title: release.title.filter(|t| !t.is_empty()).or(material.title),
            title_orig: release
                .title_orig
                .filter(|t| !t.is_empty())
                .or(material.title_en),
            shikimori_id: material.shikimori_id.or(release.shikimori_id),
            year: release.year.or(material.year),
            episodes_count: material.episodes_total.or(release.episodes_count),
            poster_url,
            description: material.description,
            genres: material.anime_genres,
            rating_shikimori: material.shikimori_rating,
            player_link: release.link.unwrap_or_default(),
            translations: release.translation.into_iter().collect(),
            quality: release.quality,
            source: Provenance::Secondary,
        }
    }
}

/// Page of flattened results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KodikAnimePage {
    pub results: Vec<KodikAnime>,
    pub total: u64,
    pub prev_page: Option<String>,
    pub next_page: Option<String>,
}

impl From<KodikPage> for KodikAnimePage {
    fn from(page: KodikPage) -> Self {
        Self {
            results: page.results.into_iter().map(KodikAnime::from).collect(),
            total: page.total.unwrap_or_default(),
            prev_page: page.prev_page,
            next_page: page.next_page,
        }
    }
}
