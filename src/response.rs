//! Response bodies shared by handlers.

use crate::model::{Item, PublicUser};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Registration outcome: `status` discriminates within a 200 response.
#[derive(Serialize)]
pub struct RegisterBody {
    pub status: u8,
    pub message: &'static str,
}

impl RegisterBody {
    pub const EMAIL_EXISTS: u8 = 1;
    pub const CREATED: u8 = 2;

    pub fn email_exists() -> Self {
        RegisterBody {
            status: Self::EMAIL_EXISTS,
            message: "This email already exists, please choose another one",
        }
    }

    pub fn created() -> Self {
        RegisterBody {
            status: Self::CREATED,
            message: "Registration successfully completed",
        }
    }
}

#[derive(Serialize)]
pub struct LoginBody {
    pub message: &'static str,
    pub user: PublicUser,
}

#[derive(Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Serialize)]
pub struct ItemsBody {
    pub items: Vec<Item>,
}

pub fn message(message: &'static str) -> Json<MessageBody> {
    Json(MessageBody { message })
}
