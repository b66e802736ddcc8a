//! Staff user repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{StaffUser, StaffUserCreate, StaffUserUpdate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const STAFF_USER_TABLE: &str = "staff_user";

#[derive(Clone)]
pub struct StaffUserRepository {
    base: BaseRepository,
}

impl StaffUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<StaffUser>> {
        let users: Vec<StaffUser> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY name")
            .bind(("tb", STAFF_USER_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<StaffUser>> {
        let key = record_key(STAFF_USER_TABLE, id);
        let user: Option<StaffUser> = self.base.db().select((STAFF_USER_TABLE, key)).await?;
        Ok(user.filter(|u| u.tenant == tenant))
    }

    /// Login lookup. Email is the login name, unique across tenants, so
    /// this one is not tenant-scoped.
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<StaffUser>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE email = $email")
            .bind(("tb", STAFF_USER_TABLE))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<StaffUser> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, tenant: &str, data: StaffUserCreate) -> RepoResult<StaffUser> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email {} already registered",
                data.email
            )));
        }

        let password_hash = StaffUser::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let user = StaffUser {
            id: None,
            tenant: tenant.to_string(),
            name: data.name,
            email: data.email,
            role: data.role,
            permissions: data.permissions.unwrap_or_default(),
            password_hash,
        };

        let created: Option<StaffUser> = self
            .base
            .db()
            .create(STAFF_USER_TABLE)
            .content(user)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff user".to_string()))
    }

    pub async fn update(
        &self,
        tenant: &str,
        id: &str,
        data: StaffUserUpdate,
    ) -> RepoResult<StaffUser> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Staff user {} not found", id)));
        }

        if let Some(email) = &data.email
            && let Some(existing) = self.find_by_email(email).await?
            && existing.id.as_ref().map(|rid| rid.key().to_string())
                != Some(record_key(STAFF_USER_TABLE, id).to_string())
        {
            return Err(RepoError::Duplicate(format!(
                "Email {} already registered",
                email
            )));
        }

        let rid = RecordId::from_table_key(STAFF_USER_TABLE, record_key(STAFF_USER_TABLE, id));
        let updated: Option<StaffUser> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Staff user {} not found", id)))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Staff user {} not found", id)));
        }
        let key = record_key(STAFF_USER_TABLE, id);
        let _: Option<StaffUser> = self.base.db().delete((STAFF_USER_TABLE, key)).await?;
        Ok(())
    }
}
