use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AssetDescriptor, CatalogItem, ItemId, lenient};
use crate::catalog::assets::{AssetKind, resolve};

/// Catalog genre. Ids are shared by both providers, names are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<AssetDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Genre {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn decorate(&mut self, cdn_base: &str) {
        self.image_url = resolve(self.image.as_ref(), AssetKind::GenreImage, cdn_base);
    }
}

/// Episode summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preview: Option<AssetDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Episode {
    pub fn decorate(&mut self, cdn_base: &str) {
        self.preview_url = resolve(self.preview.as_ref(), AssetKind::Preview, cdn_base);
    }
}

/// Franchise. Member releases are found by scanning the release pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<AssetDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Franchise {
    pub fn new(id: impl Into<ItemId>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            image: None,
            image_url: None,
            extra: Map::new(),
        }
    }

    pub fn decorate(&mut self, cdn_base: &str) {
        self.image_url = resolve(self.image.as_ref(), AssetKind::Poster, cdn_base);
    }
}

/// Torrent listing entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Torrent {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub release: Option<CatalogItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Torrent {
    pub fn decorate(&mut self, cdn_base: &str) {
        if let Some(ref mut release) = self.release {
            release.decorate(cdn_base);
        }
    }
}

/// Promotional or episode video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preview: Option<AssetDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Video {
    pub fn decorate(&mut self, cdn_base: &str) {
        self.preview_url = resolve(self.preview.as_ref(), AssetKind::Preview, cdn_base);
    }
}
