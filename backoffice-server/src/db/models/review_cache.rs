//! Review cache record
//!
//! One record per Google place id. `cached_at` is epoch millis; entries
//! older than the configured TTL are refreshed on the next request, never
//! served stale.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCacheRecord {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Upstream payload as returned by the places API
    pub result: serde_json::Value,
    /// Epoch millis of the last successful upstream fetch
    pub cached_at: i64,
}
