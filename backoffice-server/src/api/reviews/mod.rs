//! Google review proxy route
//!
//! Public, outside `/api`: the customer-facing site calls it without a
//! token. `placeId` comes from the query string or, for POST, the JSON
//! body. CORS is handled on the app router, which rewrites OPTIONS
//! preflights to an empty 204.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/getGoogleReviews",
        get(handler::get_reviews).post(handler::post_reviews),
    )
}
