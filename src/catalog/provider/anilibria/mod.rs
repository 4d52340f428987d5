mod provider;

pub use provider::{AniLibriaProvider, ANILIBRIA_API_URL, ANILIBRIA_CDN_URL};
