pub mod anilibria;
mod http;
pub mod kodik;
mod traits;

pub use anilibria::AniLibriaProvider;
pub use http::{AuthScheme, HttpClient};
pub use kodik::KodikProvider;
pub use traits::{FallbackSource, ReleaseSource};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Parse a list of raw records, skipping the ones that do not fit the schema
pub(crate) fn parse_records<T: DeserializeOwned>(
    provider: &str,
    kind: &str,
    values: Vec<Value>,
) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} {} record: {}", provider, kind, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            "{} {}: kept {} of {} records",
            provider,
            kind,
            records.len(),
            total
        );
    }

    records
}
