//! Rows and request/response bodies for users and items.

use serde::{Deserialize, Serialize};

/// Stored user. `password` holds an Argon2 PHC string, never the submitted text.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User fields ready for insert; `password_hash` is already hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// The subset of a user returned by login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        PublicUser {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub description: String,
    pub user_id: i64,
}

/// Body of item create and update; update overwrites all four fields.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub author: String,
    pub description: String,
    pub user_id: i64,
}

impl ItemInput {
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            author: self.author,
            description: self.description,
            user_id: self.user_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
