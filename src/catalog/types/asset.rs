use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Raw asset reference as the upstream returns it.
///
/// Paths are relative to the provider CDN. Which of `src`, `preview` and
/// `thumbnail` is populated depends on the provider and the asset kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Re-encoded variant, preferred over the base paths when present
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub optimized: Option<AssetVariant>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optimized variant of an asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetVariant {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetDescriptor {
    /// Descriptor with only a base `src` path
    pub fn from_src(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    /// Builder pattern: set the optimized variant
    pub fn with_optimized(mut self, optimized: AssetVariant) -> Self {
        self.optimized = Some(optimized);
        self
    }
}
