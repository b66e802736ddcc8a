//! Back-office server - restaurant dashboard backend
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SurrealDB storage, tenant-scoped repositories
//! - **Order lifecycle** (`orders`): status state machine, stock reconciliation, kanban derivation
//! - **Auth** (`auth`): JWT + Argon2 authentication
//! - **Services** (`services`): in-process event bus, review cache proxy
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! backoffice-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, middleware
//! ├── db/            # database layer (models + repositories)
//! ├── orders/        # lifecycle state machine, stock ledger, kanban
//! ├── services/      # event bus, review cache
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderLifecycleService, StockService};
pub use services::EventBus;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging before anything else runs
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}
