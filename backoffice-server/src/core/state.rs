use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{EventBus, GooglePlacesFetcher, ReviewCacheService};

/// Server state - shared handles to every service
///
/// Cloning is shallow (`Arc` internals), so handlers receive it by value.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | JWT auth service |
/// | event_bus | Arc<EventBus> | In-process change notification bus |
/// | review_service | Arc<ReviewCacheService> | Google review proxy with TTL cache |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub event_bus: Arc<EventBus>,
    pub review_service: Arc<ReviewCacheService>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        event_bus: Arc<EventBus>,
        review_service: Arc<ReviewCacheService>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            event_bus,
            review_service,
        }
    }

    /// Initialize the server state
    ///
    /// 1. Ensure the data directory exists
    /// 2. Open the embedded database
    /// 3. Construct services (JWT, event bus)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let db_service = DbService::open(&config.database_path()).await?;

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let event_bus = Arc::new(EventBus::new());
        let fetcher = Arc::new(GooglePlacesFetcher::new(config.google_api_key.clone()));
        let review_service = Arc::new(ReviewCacheService::new(
            db_service.db.clone(),
            fetcher,
            config.review_cache_ttl_ms,
        ));

        Ok(Self::new(
            config.clone(),
            db_service.db,
            jwt_service,
            event_bus,
            review_service,
        ))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Broadcast a resource change to live subscribers
    ///
    /// Versions increment per resource so subscribers can drop stale updates.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        self.event_bus.broadcast_sync(resource, action, id, data);
    }
}
