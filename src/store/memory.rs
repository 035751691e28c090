//! In-process store with the same observable behavior as the PostgreSQL one.

use super::Store;
use crate::error::AppError;
use crate::model::{Item, ItemInput, NewUser, User};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    last_user_id: i64,
    last_item_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn user(&self, id: i64) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!("email already registered: {}", user.email)));
        }
        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.users.insert(
            id,
            User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                password: user.password_hash.clone(),
            },
        );
        Ok(id)
    }

    async fn create_item(&self, item: &ItemInput) -> Result<i64, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_item_id += 1;
        let id = tables.last_item_id;
        tables.items.insert(id, item.clone().into_item(id));
        Ok(id)
    }

    async fn update_item(&self, id: i64, item: &ItemInput) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(&id) {
            Some(existing) => {
                *existing = item.clone().into_item(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn items_for_user(&self, user_id: i64) -> Result<Vec<Item>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_item(&self, id: i64) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.items.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
