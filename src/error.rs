use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{ApiResponse, catalog::CatalogError};

/// Errors surfaced by the REST layer
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Upstream statuses pass through as-is
            Self::Catalog(err) => {
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Validation(_) | Self::BadRequest(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", message);
        } else {
            warn!("Request rejected: {}", message);
        }

        let body = ApiResponse::<()> {
            code: status.as_u16(),
            message,
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let upstream = AppError::from(CatalogError::Upstream {
            status: 404,
            body: "missing".to_string(),
        });
        assert_eq!(upstream.status(), StatusCode::NOT_FOUND);

        let transport = AppError::from(CatalogError::Transport("refused".to_string()));
        assert_eq!(transport.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let parse = AppError::from(CatalogError::Parse("bad json".to_string()));
        assert_eq!(parse.status(), StatusCode::BAD_GATEWAY);

        let disabled = AppError::from(CatalogError::Unavailable("kodik".to_string()));
        assert_eq!(disabled.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bad = AppError::BadRequest("genres".to_string());
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_upstream_status_is_bad_gateway() {
        let err = AppError::from(CatalogError::Upstream {
            status: 1000,
            body: String::new(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
