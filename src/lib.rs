//! Garden API: user registration/login and per-user items over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod password;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, DatabaseConfig};
pub use error::{AppError, ConfigError};
pub use routes::app_router;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Store};
