//! Order API module
//!
//! | Path | Method | Description |
//! |------|--------|------|
//! | /api/orders | GET, POST | list / create |
//! | /api/orders/kanban | GET | derived board columns |
//! | /api/orders/{id} | GET, DELETE | fetch / remove |
//! | /api/orders/{id}/advance | POST | one step forward |
//! | /api/orders/{id}/status | POST | direct reassignment |
//! | /api/orders/{id}/finalize | POST | deliver + stock debit |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/kanban", get(handler::kanban))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/status", post(handler::reassign_status))
        .route("/{id}/finalize", post(handler::finalize))
}
