use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link.
///
/// Immutable after creation except for `clicks`, which is only ever
/// incremented by the redirect resolver through an atomic SQL update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

/// Store-wide aggregates for the stats page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTotals {
    pub total_links: u64,
    pub total_clicks: u64,
}
