use axum::{Json, Router, extract::State, routing::get};
use serde::Deserialize;
use validator::Validate;

use super::{ValidQuery, default_offset};
use crate::{
    ApiResult, Ctx,
    catalog::{Torrent, Video},
};

/// Single-batch paging; the default limit differs per listing
#[derive(Debug, Deserialize, Validate)]
pub struct MediaQuery {
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    #[serde(default = "default_offset")]
    pub offset: usize,
}

/// GET /api/anilibria/torrents?limit=...&offset=...
async fn torrents(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<MediaQuery>,
) -> ApiResult<Vec<Torrent>> {
    let limit = params.limit.unwrap_or(20);
    Ok(Json(ctx.catalog.torrents(limit, params.offset).await?))
}

/// GET /api/anilibria/videos?limit=...&offset=...
async fn videos(
    State(ctx): State<Ctx>,
    ValidQuery(params): ValidQuery<MediaQuery>,
) -> ApiResult<Vec<Video>> {
    let limit = params.limit.unwrap_or(12);
    Ok(Json(ctx.catalog.videos(limit, params.offset).await?))
}

pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/anilibria/torrents", get(torrents))
        .route("/anilibria/videos", get(videos))
}
