//! Response shapes specific to the Albion Online Data Project API.

use serde::Deserialize;

use crate::models::{HistoryPoint, HistorySeries};

/// Body of `/api/v2/stats/history/{id}`.
///
/// The API normally wraps points per (location, quality) series, but some
/// deployments return the points directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HistoryResponse {
    Wrapped(Vec<HistorySeries>),
    Flat(Vec<HistoryPoint>),
}

impl HistoryResponse {
    /// Points of the first series, or the flat list as-is.
    pub(crate) fn into_points(self) -> Vec<HistoryPoint> {
        match self {
            HistoryResponse::Wrapped(series) => series
                .into_iter()
                .next()
                .map(|first| first.data)
                .unwrap_or_default(),
            HistoryResponse::Flat(points) => points,
        }
    }
}
