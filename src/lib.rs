use std::sync::Arc;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::{catalog::CatalogService, error::AppError};

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;

/// Shared state handed to every route
#[derive(Clone)]
pub struct Ctx {
    pub catalog: Arc<CatalogService>,
}

impl Ctx {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }
}

/// JSON envelope for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

/// Handler result: the payload itself, or an enveloped error
pub type ApiResult<T> = Result<Json<T>, AppError>;
