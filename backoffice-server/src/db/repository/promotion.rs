//! Promotion repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Promotion, PromotionCreate, PromotionUpdate};
use crate::utils::time::now_iso;
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PROMOTION_TABLE: &str = "promotion";

#[derive(Clone)]
pub struct PromotionRepository {
    base: BaseRepository,
}

impl PromotionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All promotions for a tenant, newest first
    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<Promotion>> {
        let promotions: Vec<Promotion> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY created_at DESC")
            .bind(("tb", PROMOTION_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(promotions)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<Promotion>> {
        let key = record_key(PROMOTION_TABLE, id);
        let promotion: Option<Promotion> = self.base.db().select((PROMOTION_TABLE, key)).await?;
        Ok(promotion.filter(|p| p.tenant == tenant))
    }

    pub async fn create(&self, tenant: &str, data: PromotionCreate) -> RepoResult<Promotion> {
        let promotion = Promotion {
            id: None,
            tenant: tenant.to_string(),
            title: data.title,
            description: data.description.unwrap_or_default(),
            promo_type: data.promo_type,
            active: data.active.unwrap_or(true),
            created_at: now_iso(),
        };

        let created: Option<Promotion> = self
            .base
            .db()
            .create(PROMOTION_TABLE)
            .content(promotion)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create promotion".to_string()))
    }

    pub async fn update(
        &self,
        tenant: &str,
        id: &str,
        data: PromotionUpdate,
    ) -> RepoResult<Promotion> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Promotion {} not found", id)));
        }

        let rid = RecordId::from_table_key(PROMOTION_TABLE, record_key(PROMOTION_TABLE, id));
        let updated: Option<Promotion> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))
    }

    /// Flip the active flag
    pub async fn toggle_active(&self, tenant: &str, id: &str) -> RepoResult<Promotion> {
        let promotion = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))?;

        #[derive(Serialize)]
        struct ActivePatch {
            active: bool,
        }

        let rid = RecordId::from_table_key(PROMOTION_TABLE, record_key(PROMOTION_TABLE, id));
        let updated: Option<Promotion> = self
            .base
            .db()
            .update(rid)
            .merge(ActivePatch {
                active: !promotion.active,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Promotion {} not found", id)))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Promotion {} not found", id)));
        }
        let key = record_key(PROMOTION_TABLE, id);
        let _: Option<Promotion> = self.base.db().delete((PROMOTION_TABLE, key)).await?;
        Ok(())
    }
}
