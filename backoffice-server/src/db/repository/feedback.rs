//! Feedback repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Feedback, FeedbackCreate};
use crate::utils::time::now_iso;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const FEEDBACK_TABLE: &str = "feedback";

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All feedback for a tenant, newest first
    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<Feedback>> {
        let entries: Vec<Feedback> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY created_at DESC")
            .bind(("tb", FEEDBACK_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(entries)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<Feedback>> {
        let key = record_key(FEEDBACK_TABLE, id);
        let entry: Option<Feedback> = self.base.db().select((FEEDBACK_TABLE, key)).await?;
        Ok(entry.filter(|f| f.tenant == tenant))
    }

    pub async fn create(&self, tenant: &str, data: FeedbackCreate) -> RepoResult<Feedback> {
        let entry = Feedback {
            id: None,
            tenant: tenant.to_string(),
            customer_name: data.customer_name,
            rating: data.rating,
            comment: data.comment.unwrap_or_default(),
            created_at: now_iso(),
        };

        let created: Option<Feedback> = self
            .base
            .db()
            .create(FEEDBACK_TABLE)
            .content(entry)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Feedback {} not found", id)));
        }
        let key = record_key(FEEDBACK_TABLE, id);
        let _: Option<Feedback> = self.base.db().delete((FEEDBACK_TABLE, key)).await?;
        Ok(())
    }
}
