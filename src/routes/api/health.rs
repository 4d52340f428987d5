use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::Ctx;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: &'static str,
}

/// GET /api
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "API is running",
        status: "ok",
    })
}

pub fn mount() -> Router<Ctx> {
    Router::new().route("/", get(health))
}
