use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::{ValidQuery, releases::LatestQuery};
use crate::{
    ApiResult, Ctx,
    catalog::{CatalogItem, Franchise, Genre},
};

/// GET /api/anilibria/schedule
async fn schedule(State(ctx): State<Ctx>) -> ApiResult<Vec<CatalogItem>> {
    Ok(Json(ctx.catalog.schedule().await?))
}

/// GET /api/anilibria/genres
async fn genres(State(ctx): State<Ctx>) -> ApiResult<Vec<Genre>> {
    Ok(Json(ctx.catalog.genres().await?))
}

/// GET /api/anilibria/random
async fn random_release(State(ctx): State<Ctx>) -> ApiResult<CatalogItem> {
    Ok(Json(ctx.catalog.random_release().await?))
}

/// GET /api/anilibria/franchises?limit=...&offset=...
async fn franchises(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<LatestQuery>,
) -> ApiResult<Vec<Franchise>> {
    let franchises = ctx.catalog.franchises(params.limit, params.offset).await?;
    Ok(Json(franchises))
}

/// GET /api/anilibria/franchises/{id}/releases
async fn franchise_releases(
    State(ctx): State<Ctx>,
    Path(id): Path<String>,
) -> ApiResult<Vec<CatalogItem>> {
    Ok(Json(ctx.catalog.franchise_releases(&id).await?))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/anilibria/schedule", get(schedule))
        .route("/anilibria/genres", get(genres))
        .route("/anilibria/random", get(random_release))
        .route("/anilibria/franchises", get(franchises))
        .route("/anilibria/franchises/{id}/releases", get(franchise_releases))
}
