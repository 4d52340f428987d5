use super::api_types::KodikPage;
use crate::catalog::{
    Result,
    provider::{AuthScheme, FallbackSource, HttpClient},
};
use async_trait::async_trait;
use std::time::Duration;

pub const KODIK_API_URL: &str = "https://kodikapi.com";

const PROVIDER: &str = "Kodik";
const ANIME_TYPES: &str = "anime,anime-serial";

/// Search parameters for `/search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KodikSearchParams {
    pub title: Option<String>,
    pub shikimori_id: Option<String>,
    /// Max results, Kodik caps this at 100
    pub limit: usize,
    pub with_material_data: bool,
}

impl Default for KodikSearchParams {
    fn default() -> Self {
        Self {
            title: None,
            shikimori_id: None,
            limit: 100,
            with_material_data: true,
        }
    }
}

impl KodikSearchParams {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn by_shikimori_id(shikimori_id: impl Into<String>) -> Self {
        Self {
            shikimori_id: Some(shikimori_id.into()),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("with_material_data", self.with_material_data.to_string()),
            ("types", ANIME_TYPES.to_string()),
        ];
        if let Some(ref title) = self.title {
            params.push(("title", title.clone()));
        }
        if let Some(ref shikimori_id) = self.shikimori_id {
            params.push(("shikimori_id", shikimori_id.clone()));
        }
        params
    }
}

/// Listing parameters for `/list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KodikListParams {
    pub limit: usize,
    pub page: usize,
    pub year: Option<i32>,
    pub translation_id: Option<i64>,
    pub with_material_data: bool,
}

impl Default for KodikListParams {
    fn default() -> Self {
        Self {
            limit: 100,
            page: 1,
            year: None,
            translation_id: None,
            with_material_data: true,
        }
    }
}

impl KodikListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("page", self.page.to_string()),
            ("with_material_data", self.with_material_data.to_string()),
            ("types", ANIME_TYPES.to_string()),
            ("sort", "updated_at".to_string()),
        ];
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(translation_id) = self.translation_id {
            params.push(("translation_id", translation_id.to_string()));
        }
        params
    }
}

pub struct KodikProvider {
    client: HttpClient,
}

impl Default for KodikProvider {
    fn default() -> Self {
        Self::new(KODIK_API_URL, AuthScheme::None)
    }
}

impl KodikProvider {
    pub fn new(api_base: impl Into<String>, auth: AuthScheme) -> Self {
        Self {
            client: HttpClient::new(PROVIDER, api_base).with_auth(auth),
        }
    }

    /// Pick the auth scheme from what is configured: bearer + CSRF wins over
    /// the legacy query token
    pub fn auth_from(
        bearer_token: Option<&str>,
        csrf_token: Option<&str>,
        api_key: Option<&str>,
    ) -> AuthScheme {
        match (bearer_token, api_key) {
            (Some(token), _) => AuthScheme::BearerCsrf {
                token: token.to_string(),
                csrf: csrf_token.unwrap_or_default().to_string(),
            },
            (None, Some(key)) => AuthScheme::QueryKey {
                param: "token".to_string(),
                key: key.to_string(),
            },
            (None, None) => AuthScheme::None,
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
}

#[async_trait]
impl FallbackSource for KodikProvider {
    fn id(&self) -> &'static str {
        "kodik"
    }

    async fn search(&self, params: &KodikSearchParams) -> Result<KodikPage> {
        self.client.get("/search", &params.to_query()).await
    }

    async fn list(&self, params: &KodikListParams) -> Result<KodikPage> {
        self.client.get("/list", &params.to_query()).await
    }

    fn close(&self) {
        self.client.close();
    }
}
