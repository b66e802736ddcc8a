//! Google review cache proxy
//!
//! Upstream place-details responses are cached per place id with a 6 hour
//! TTL. Within the TTL the cached payload is returned without touching the
//! upstream; past it a fresh fetch refreshes the record before answering.
//! Stale data is never served past the TTL.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::ReviewCacheRepository;
use crate::utils::time::now_ms;

const PLACE_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const PLACE_DETAILS_FIELDS: &str =
    "reviews,rating,user_ratings_total,name,geometry,formatted_address,photos";

/// Proxy failure taxonomy. Upstream-status errors and transport errors map
/// to different HTTP responses, so callers can tell a bad place id from a
/// network problem.
#[derive(Debug, thiserror::Error)]
pub enum ReviewProxyError {
    #[error("Missing placeId")]
    MissingPlaceId,

    #[error("upstream status {status}")]
    Upstream {
        status: String,
        details: Option<String>,
    },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<crate::db::repository::RepoError> for ReviewProxyError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        ReviewProxyError::Transport(err.to_string())
    }
}

impl IntoResponse for ReviewProxyError {
    fn into_response(self) -> Response {
        match self {
            ReviewProxyError::MissingPlaceId => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing placeId" })),
            )
                .into_response(),
            ReviewProxyError::Upstream { status, details } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": status, "details": details })),
            )
                .into_response(),
            ReviewProxyError::Transport(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch Google Reviews",
                    "details": details,
                })),
            )
                .into_response(),
        }
    }
}

/// Upstream fetch seam. The production implementation talks to the Google
/// Places API; tests substitute a counting fake.
#[async_trait]
pub trait ReviewFetcher: Send + Sync {
    /// Full upstream response body (`status`, `result`, `error_message`)
    async fn fetch(&self, place_id: &str) -> Result<Value, ReviewProxyError>;
}

pub struct GooglePlacesFetcher {
    client: reqwest::Client,
    api_key: String,
}

impl GooglePlacesFetcher {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl ReviewFetcher for GooglePlacesFetcher {
    async fn fetch(&self, place_id: &str) -> Result<Value, ReviewProxyError> {
        let response = self
            .client
            .get(PLACE_DETAILS_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", PLACE_DETAILS_FIELDS),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| ReviewProxyError::Transport(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ReviewProxyError::Transport(e.to_string()))
    }
}

pub struct ReviewCacheService {
    repo: ReviewCacheRepository,
    fetcher: Arc<dyn ReviewFetcher>,
    ttl_ms: i64,
}

impl ReviewCacheService {
    pub fn new(db: Surreal<Db>, fetcher: Arc<dyn ReviewFetcher>, ttl_ms: i64) -> Self {
        Self {
            repo: ReviewCacheRepository::new(db),
            fetcher,
            ttl_ms,
        }
    }

    pub async fn get_reviews(&self, place_id: &str) -> Result<Value, ReviewProxyError> {
        self.get_reviews_at(place_id, now_ms()).await
    }

    /// TTL decisions take the clock as an argument so they are testable
    pub async fn get_reviews_at(&self, place_id: &str, now: i64) -> Result<Value, ReviewProxyError> {
        if place_id.is_empty() {
            return Err(ReviewProxyError::MissingPlaceId);
        }

        if let Some(record) = self.repo.get(place_id).await?
            && now - record.cached_at < self.ttl_ms
        {
            tracing::debug!(place_id, age_ms = now - record.cached_at, "review cache hit");
            return Ok(record.result);
        }

        let body = self.fetcher.fetch(place_id).await?;

        let status = body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN_ERROR")
            .to_string();
        if status != "OK" {
            let details = body
                .get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string);
            return Err(ReviewProxyError::Upstream { status, details });
        }

        let result = body.get("result").cloned().unwrap_or(Value::Null);
        self.repo.put(place_id, result.clone(), now).await?;
        tracing::info!(place_id, "review cache refreshed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::REVIEW_CACHE_TTL_MS;
    use crate::db::DbService;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReviewFetcher for CountingFetcher {
        async fn fetch(&self, _place_id: &str) -> Result<Value, ReviewProxyError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(json!({
                "status": "OK",
                "result": { "rating": 4.5, "fetch": n },
            }))
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl ReviewFetcher for FailingFetcher {
        async fn fetch(&self, _place_id: &str) -> Result<Value, ReviewProxyError> {
            Ok(json!({
                "status": "INVALID_REQUEST",
                "error_message": "Invalid place id",
            }))
        }
    }

    async fn service_with(fetcher: Arc<dyn ReviewFetcher>) -> ReviewCacheService {
        let db = DbService::memory().await.unwrap();
        ReviewCacheService::new(db.db, fetcher, REVIEW_CACHE_TTL_MS)
    }

    #[tokio::test]
    async fn serves_cached_within_ttl_and_refreshes_after() {
        let fetcher = CountingFetcher::new();
        let service = service_with(fetcher.clone()).await;

        let three_hours = 3 * 60 * 60 * 1000;
        let seven_hours = 7 * 60 * 60 * 1000;

        let first = service.get_reviews_at("place-1", 0).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first["fetch"], 1);

        // 3h later: within TTL, upstream untouched
        let cached = service.get_reviews_at("place-1", three_hours).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(cached["fetch"], 1);

        // 7h later: past TTL, fresh fetch refreshes the record
        let fresh = service.get_reviews_at("place-1", seven_hours).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(fresh["fetch"], 2);
    }

    #[tokio::test]
    async fn distinct_place_ids_cache_independently() {
        let fetcher = CountingFetcher::new();
        let service = service_with(fetcher.clone()).await;

        service.get_reviews_at("place-a", 0).await.unwrap();
        service.get_reviews_at("place-b", 0).await.unwrap();
        assert_eq!(fetcher.calls(), 2);

        service.get_reviews_at("place-a", 1000).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn empty_place_id_is_rejected() {
        let fetcher = CountingFetcher::new();
        let service = service_with(fetcher.clone()).await;

        let err = service.get_reviews_at("", 0).await.unwrap_err();
        assert!(matches!(err, ReviewProxyError::MissingPlaceId));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn upstream_non_ok_status_is_not_cached() {
        let service = service_with(Arc::new(FailingFetcher)).await;

        let err = service.get_reviews_at("bad-place", 0).await.unwrap_err();
        match err {
            ReviewProxyError::Upstream { status, details } => {
                assert_eq!(status, "INVALID_REQUEST");
                assert_eq!(details.as_deref(), Some("Invalid place id"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
