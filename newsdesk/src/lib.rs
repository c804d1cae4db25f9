//! # newsdesk
//!
//! REST backend for blogs and news articles on PostgreSQL.
//!
//! Requests flow through three layers:
//!
//! - **Handlers** ([`handlers`]): parse identifiers, bodies and list
//!   parameters, and map results and errors to HTTP responses
//! - **Usecases** ([`usecase`]): the seam for business rules, forwarding to
//!   repositories today
//! - **Repositories** ([`repository`]): SQL against the `blogs` and `news`
//!   tables, including paginated listings and news soft delete
//!
//! ## Example
//!
//! ```rust,no_run
//! use newsdesk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(config.require_database()?).await?;
//!     let state = AppState::from_pool(config.clone(), pool);
//!
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod pagination;
pub mod repository;
pub mod server;
pub mod state;
pub mod usecase;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, PaginationConfig};
    pub use crate::database::{create_pool, run_migrations};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{router, ApiError, ApiErrorKind};
    pub use crate::models::{Blog, BlogPayload, News, NewsPayload, Paged};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::PaginationQuery;
    pub use crate::repository::{BlogRepository, NewsRepository, RepositoryError};
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::usecase::{BlogUsecase, NewsUsecase};
}
