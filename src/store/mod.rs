//! Data store seam. Handlers only see `dyn Store`; PostgreSQL backs it in production and
//! `MemoryStore` in tests.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::model::{Item, ItemInput, NewUser, User};
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::{connect_lazy, ensure_database_exists, ensure_tables, PgStore};

/// One method per statement the HTTP surface issues. No method spans more than one statement.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Insert a user. A second user with the same email fails with `AppError::Conflict`.
    async fn insert_user(&self, user: &NewUser) -> Result<i64, AppError>;

    /// Insert an item and return its new id.
    async fn create_item(&self, item: &ItemInput) -> Result<i64, AppError>;

    /// Overwrite all fields of item `id`. Returns rows affected (0 when absent).
    async fn update_item(&self, id: i64, item: &ItemInput) -> Result<u64, AppError>;

    /// Items owned by `user_id`, ordered by id.
    async fn items_for_user(&self, user_id: i64) -> Result<Vec<Item>, AppError>;

    /// Delete item `id`. Returns rows affected (0 when absent).
    async fn delete_item(&self, id: i64) -> Result<u64, AppError>;

    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
