//! Review cache repository
//!
//! Keyed by Google place id. Shared infrastructure rather than tenant
//! data, so nothing here is tenant-scoped.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::ReviewCacheRecord;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const REVIEW_CACHE_TABLE: &str = "review_cache";

#[derive(Clone)]
pub struct ReviewCacheRepository {
    base: BaseRepository,
}

impl ReviewCacheRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn get(&self, place_id: &str) -> RepoResult<Option<ReviewCacheRecord>> {
        let record: Option<ReviewCacheRecord> =
            self.base.db().select((REVIEW_CACHE_TABLE, place_id)).await?;
        Ok(record)
    }

    /// Insert or overwrite the cached payload for a place
    pub async fn put(
        &self,
        place_id: &str,
        result: serde_json::Value,
        cached_at: i64,
    ) -> RepoResult<ReviewCacheRecord> {
        let record = ReviewCacheRecord {
            id: None,
            result,
            cached_at,
        };
        let stored: Option<ReviewCacheRecord> = self
            .base
            .db()
            .upsert((REVIEW_CACHE_TABLE, place_id))
            .content(record)
            .await?;
        stored.ok_or_else(|| RepoError::Database("Failed to store review cache".to_string()))
    }
}
