//! Product API module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/products | GET, POST | list / create |
//! | /api/products/{id} | GET, PUT, DELETE | fetch / update / remove |
//! | /api/products/{id}/toggle-status | POST | Ativo <-> Pausado |
//! | /api/products/{id}/stock | PUT | absolute stock replenishment |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/toggle-status", post(handler::toggle_status))
        .route("/{id}/stock", put(handler::replenish_stock))
}
