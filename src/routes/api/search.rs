use axum::{Json, Router, extract::State, routing::get};
use serde::Deserialize;
use validator::Validate;

use super::{ValidQuery, default_offset, parse_genre_ids, releases::default_limit};
use crate::{
    ApiResult, Ctx,
    catalog::{CatalogItem, SearchFilter},
};

/// Search request parameters
#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
    /// Free-text query, also used for the Kodik fallback
    pub query: Option<String>,
    /// Comma-separated genre ids, any of which must match
    pub genres: Option<String>,
    pub year: Option<i32>,
    /// Season token, e.g. `winter`
    pub season: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: usize,
    #[serde(default = "default_offset")]
    pub offset: usize,
}

impl SearchQuery {
    fn to_filter(&self) -> Result<SearchFilter, crate::error::AppError> {
        let mut filter = SearchFilter::new()
            .with_year(self.year)
            .with_genres(parse_genre_ids(self.genres.as_deref())?);
        filter.query = self.query.clone();
        filter.season = self
            .season
            .as_deref()
            .map(str::trim)
            .filter(|season| !season.is_empty())
            .map(str::to_string);
        Ok(filter)
    }
}

/// Search releases, falling back to Kodik when nothing matches a text query
/// GET /api/anilibria/search?query=...&genres=...&year=...&season=...
async fn search_releases(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<SearchQuery>,
) -> ApiResult<Vec<CatalogItem>> {
    let filter = params.to_filter()?;

    let releases = ctx
        .catalog
        .search_with_fallback(&filter, params.limit, params.offset)
        .await?;
    Ok(Json(releases))
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/anilibria/search", get(search_releases))
}
