//! API route modules
//!
//! One module per resource, each exposing `router()`. Resource modules
//! under `/api/*` expect the auth middleware to have injected
//! [`CurrentUser`](crate::auth::CurrentUser); `health` and `reviews` are
//! public.

use axum::{Router, extract::Request, middleware::Next, response::Response};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod auth;
pub mod feedbacks;
pub mod health;
pub mod orders;
pub mod products;
pub mod promotions;
pub mod reviews;
pub mod scheduled_posts;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Answer CORS preflights with 204 No Content
///
/// The CORS layer short-circuits preflights itself but replies 200; the
/// browser contract for this API is an empty 204.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(promotions::router())
        .merge(scheduled_posts::router())
        .merge(users::router())
        .merge(feedbacks::router())
        // Public routes
        .merge(reviews::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and auth
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(preflight_no_content))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::require_auth,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use tower::util::ServiceExt;

    use crate::auth::{JwtConfig, JwtService};
    use crate::core::Config;
    use crate::db::DbService;
    use crate::services::{EventBus, GooglePlacesFetcher, ReviewCacheService};

    async fn test_state() -> ServerState {
        let db = DbService::memory().await.unwrap().db;
        let jwt_service = Arc::new(JwtService::new(JwtConfig::from_env()));
        let event_bus = Arc::new(EventBus::new());
        let fetcher = Arc::new(GooglePlacesFetcher::new(String::new()));
        let review_service = Arc::new(ReviewCacheService::new(db.clone(), fetcher, 1000));
        ServerState::new(Config::from_env(), db, jwt_service, event_bus, review_service)
    }

    #[tokio::test]
    async fn cors_preflight_answers_no_content() {
        let state = test_state().await;
        let app = build_app(&state).with_state(state);

        let request = http::Request::builder()
            .method(Method::OPTIONS)
            .uri("/getGoogleReviews")
            .header(http::header::ORIGIN, "https://example.com")
            .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(
            response
                .headers()
                .contains_key(http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }

    #[tokio::test]
    async fn unauthenticated_api_request_gets_error_envelope() {
        let state = test_state().await;
        let app = build_app(&state).with_state(state);

        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/api/orders")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], serde_json::json!(false));
    }

    #[tokio::test]
    async fn health_body_is_bare_json() {
        let state = test_state().await;
        let app = build_app(&state).with_state(state);

        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], serde_json::json!("ok"));
        assert!(body.get("success").is_none());
    }
}
