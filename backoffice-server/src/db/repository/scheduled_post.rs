//! Scheduled post repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{ScheduledPost, ScheduledPostCreate, ScheduledPostUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SCHEDULED_POST_TABLE: &str = "scheduled_post";

#[derive(Clone)]
pub struct ScheduledPostRepository {
    base: BaseRepository,
}

impl ScheduledPostRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All posts for a tenant, soonest first
    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<ScheduledPost>> {
        let posts: Vec<ScheduledPost> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY scheduled_at")
            .bind(("tb", SCHEDULED_POST_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(posts)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<ScheduledPost>> {
        let key = record_key(SCHEDULED_POST_TABLE, id);
        let post: Option<ScheduledPost> =
            self.base.db().select((SCHEDULED_POST_TABLE, key)).await?;
        Ok(post.filter(|p| p.tenant == tenant))
    }

    pub async fn create(&self, tenant: &str, data: ScheduledPostCreate) -> RepoResult<ScheduledPost> {
        let post = ScheduledPost {
            id: None,
            tenant: tenant.to_string(),
            content: data.content,
            platforms: data.platforms,
            scheduled_at: data.scheduled_at,
            media_url: data.media_url,
        };

        let created: Option<ScheduledPost> = self
            .base
            .db()
            .create(SCHEDULED_POST_TABLE)
            .content(post)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create scheduled post".to_string()))
    }

    pub async fn update(
        &self,
        tenant: &str,
        id: &str,
        data: ScheduledPostUpdate,
    ) -> RepoResult<ScheduledPost> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Scheduled post {} not found",
                id
            )));
        }

        let rid =
            RecordId::from_table_key(SCHEDULED_POST_TABLE, record_key(SCHEDULED_POST_TABLE, id));
        let updated: Option<ScheduledPost> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Scheduled post {} not found", id)))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Scheduled post {} not found",
                id
            )));
        }
        let key = record_key(SCHEDULED_POST_TABLE, id);
        let _: Option<ScheduledPost> = self.base.db().delete((SCHEDULED_POST_TABLE, key)).await?;
        Ok(())
    }
}
