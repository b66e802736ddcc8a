//! Repository module
//!
//! Tenant-scoped CRUD over the embedded SurrealDB tables. Every method
//! takes the tenant id from the authenticated caller; records from other
//! tenants are indistinguishable from missing records.

pub mod feedback;
pub mod order;
pub mod product;
pub mod promotion;
pub mod review_cache;
pub mod scheduled_post;
pub mod staff_user;

// Re-exports
pub use feedback::FeedbackRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use promotion::PromotionRepository;
pub use review_cache::ReviewCacheRepository;
pub use scheduled_post::ScheduledPostRepository;
pub use staff_user::StaffUserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a `table:` prefix so ids are accepted in both `"abc"` and
/// `"table:abc"` forms
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository holding the database handle
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
