mod api_types;
mod provider;

pub use api_types::{KodikAnime, KodikAnimePage, KodikPage, KodikRelease, MaterialData, Translation};
pub use provider::{KODIK_API_URL, KodikListParams, KodikProvider, KodikSearchParams};
