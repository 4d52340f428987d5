use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;
use validator::Validate;

use super::{ValidQuery, default_offset};
use crate::{
    ApiResult, Ctx,
    catalog::{CatalogItem, Episode},
};

/// Paging over a listing that may span several upstream batches
#[derive(Debug, Deserialize, Validate)]
pub struct LatestQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: usize,
    #[serde(default = "default_offset")]
    pub offset: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SimilarQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 24))]
    pub limit: usize,
}

pub(super) fn default_limit() -> usize {
    12
}

/// GET /api/anilibria/releases/latest?limit=...&offset=...
async fn latest_releases(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<LatestQuery>,
) -> ApiResult<Vec<CatalogItem>> {
    let releases = ctx
        .catalog
        .latest_releases(params.limit, params.offset)
        .await?;
    Ok(Json(releases))
}

/// GET /api/anilibria/releases/{id}
async fn get_release(State(ctx): State<Ctx>, Path(id): Path<i64>) -> ApiResult<CatalogItem> {
    Ok(Json(ctx.catalog.release(id).await?))
}

/// GET /api/anilibria/releases/alias/{alias}
async fn get_release_by_alias(
    State(ctx): State<Ctx>,
    Path(alias): Path<String>,
) -> ApiResult<CatalogItem> {
    Ok(Json(ctx.catalog.release_by_alias(&alias).await?))
}

/// GET /api/anilibria/releases/{id}/episodes
async fn get_episodes(State(ctx): State<Ctx>, Path(id): Path<i64>) -> ApiResult<Vec<Episode>> {
    Ok(Json(ctx.catalog.episodes(id).await?))
}

/// GET /api/anilibria/releases/{id}/similar?limit=...
async fn similar_releases(
    State(ctx): State<Ctx>,
    Path(id): Path<i64>,
    ValidQuery(params): ValidQuery<SimilarQuery>,
) -> ApiResult<Vec<CatalogItem>> {
    Ok(Json(ctx.catalog.similar_releases(id, params.limit).await?))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/anilibria/releases/latest", get(latest_releases))
        .route("/anilibria/releases/alias/{alias}", get(get_release_by_alias))
        .route("/anilibria/releases/{id}", get(get_release))
        .route("/anilibria/releases/{id}/episodes", get(get_episodes))
        .route("/anilibria/releases/{id}/similar", get(similar_releases))
}
