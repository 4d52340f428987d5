use axum::{
    Router,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{Ctx, error::AppError};

pub mod health;
pub mod kodik;
pub mod listings;
pub mod media;
pub mod releases;
pub mod search;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(releases::mount())
        .merge(search::mount())
        .merge(listings::mount())
        .merge(media::mount())
        .merge(kodik::mount())
}

/// Query string that is deserialized and validated, rejecting with the
/// JSON error envelope
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)?;
        value.validate()?;
        Ok(Self(value))
    }
}

fn default_offset() -> usize {
    0
}

/// Comma-separated genre ids, blanks ignored
pub(crate) fn parse_genre_ids(csv: Option<&str>) -> Result<Vec<i64>, AppError> {
    let Some(csv) = csv else {
        return Ok(Vec::new());
    };

    csv.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid genre id: {id}")))
        })
        .collect()
}
