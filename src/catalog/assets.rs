use crate::catalog::types::{AssetDescriptor, AssetVariant};

/// Asset kinds, each with its own set of candidate path keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Release posters and franchise images
    Poster,
    /// Episode and video previews
    Preview,
    /// Genre cover images
    GenreImage,
}

#[derive(Debug, Clone, Copy)]
enum AssetKey {
    Src,
    Preview,
    Thumbnail,
}

impl AssetKind {
    /// Keys tried for this kind, always in `src`, `preview`, `thumbnail` order
    const fn keys(self) -> &'static [AssetKey] {
        match self {
            Self::Poster | Self::Preview => &[AssetKey::Src, AssetKey::Preview, AssetKey::Thumbnail],
            Self::GenreImage => &[AssetKey::Preview, AssetKey::Thumbnail],
        }
    }
}

fn variant_path(variant: &AssetVariant, key: AssetKey) -> Option<&str> {
    match key {
        AssetKey::Src => variant.src.as_deref(),
        AssetKey::Preview => variant.preview.as_deref(),
        AssetKey::Thumbnail => variant.thumbnail.as_deref(),
    }
}

fn base_path(descriptor: &AssetDescriptor, key: AssetKey) -> Option<&str> {
    match key {
        AssetKey::Src => descriptor.src.as_deref(),
        AssetKey::Preview => descriptor.preview.as_deref(),
        AssetKey::Thumbnail => descriptor.thumbnail.as_deref(),
    }
}

/// Resolve an asset descriptor to an absolute URL.
///
/// The optimized variant wins over the base paths; within each, keys are
/// tried in the kind's order and the first non-empty path is appended to
/// `cdn_base` verbatim. Returns `None` when nothing usable is present.
pub fn resolve(
    descriptor: Option<&AssetDescriptor>,
    kind: AssetKind,
    cdn_base: &str,
) -> Option<String> {
    let descriptor = descriptor?;
    let keys = kind.keys();

    let optimized = descriptor
        .optimized
        .as_ref()
        .and_then(|variant| keys.iter().find_map(|key| non_empty(variant_path(variant, *key))));

    optimized
        .or_else(|| keys.iter().find_map(|key| non_empty(base_path(descriptor, *key))))
        .map(|path| format!("{cdn_base}{path}"))
}

fn non_empty(path: Option<&str>) -> Option<&str> {
    path.filter(|path| !path.is_empty())
}
