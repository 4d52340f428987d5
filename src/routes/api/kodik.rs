use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;
use validator::Validate;

use super::ValidQuery;
use crate::{
    ApiResult, Ctx,
    catalog::{KodikAnime, KodikAnimePage, KodikListParams, KodikSearchParams},
};

/// Kodik search parameters
#[derive(Debug, Deserialize, Validate)]
pub struct KodikSearchQuery {
    pub title: Option<String>,
    pub shikimori_id: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

/// Kodik listing parameters
#[derive(Debug, Deserialize, Validate)]
pub struct KodikListQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    pub year: Option<i32>,
    pub translation_id: Option<i64>,
}

fn default_limit() -> usize {
    100
}

fn default_page() -> usize {
    1
}

impl From<KodikSearchQuery> for KodikSearchParams {
    fn from(query: KodikSearchQuery) -> Self {
        Self {
            title: query.title,
            shikimori_id: query.shikimori_id,
            limit: query.limit,
            ..Default::default()
        }
    }
}

impl From<KodikListQuery> for KodikListParams {
    fn from(query: KodikListQuery) -> Self {
        Self {
            limit: query.limit,
            page: query.page,
            year: query.year,
            translation_id: query.translation_id,
            ..Default::default()
        }
    }
}

/// GET /api/kodik/search?title=...&shikimori_id=...&limit=...
async fn search(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<KodikSearchQuery>,
) -> ApiResult<KodikAnimePage> {
    Ok(Json(ctx.catalog.kodik_search(&params.into()).await?))
}

/// GET /api/kodik/anime/{shikimori_id}
async fn get_anime(
    State(ctx): State<Ctx>,
    Path(shikimori_id): Path<String>,
) -> ApiResult<KodikAnime> {
    Ok(Json(ctx.catalog.kodik_anime(&shikimori_id).await?))
}

/// GET /api/kodik/list?limit=...&page=...&year=...&translation_id=...
async fn list(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<KodikListQuery>,
) -> ApiResult<KodikAnimePage> {
    Ok(Json(ctx.catalog.kodik_list(&params.into()).await?))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/kodik/search", get(search))
        .route("/kodik/anime/{shikimori_id}", get(get_anime))
        .route("/kodik/list", get(list))
}
