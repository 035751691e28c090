//! Item handlers: create, update, list by user, delete.

use crate::error::AppError;
use crate::extractors::{ApiJson, SessionUser};
use crate::model::ItemInput;
use crate::response::{message, CreatedBody, ItemsBody, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// POST /api/dashboard/items
pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ItemInput>,
) -> Result<Json<CreatedBody>, AppError> {
    let id = state.store.create_item(&body).await?;
    tracing::info!(item_id = id, user_id = body.user_id, "item created");
    Ok(Json(CreatedBody {
        message: "Form data sent successfully",
        id,
    }))
}

/// PATCH /api/dashboard/items/:id — overwrites every field; an unknown id still succeeds.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ApiJson(body): ApiJson<ItemInput>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id_str)?;
    let rows = state.store.update_item(id, &body).await?;
    tracing::info!(item_id = id, rows, "item updated");
    Ok(message("Form data successfully updated"))
}

/// GET /api/dashboard/items/:id — here `:id` is the owning user's id.
pub async fn list_user_items(
    State(state): State<AppState>,
    Path(user_id_str): Path<String>,
) -> Result<Json<ItemsBody>, AppError> {
    let user_id = parse_id(&user_id_str)?;
    let items = state.store.items_for_user(user_id).await?;
    Ok(Json(ItemsBody { items }))
}

/// GET /api/dashboard/items — owning user id comes from the `user_id` cookie.
pub async fn list_session_items(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ItemsBody>, AppError> {
    let items = state.store.items_for_user(user_id).await?;
    Ok(Json(ItemsBody { items }))
}

/// DELETE /api/dashboard/items/:id — succeeds whether or not a row was removed.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id_str)?;
    let rows = state.store.delete_item(id).await?;
    tracing::info!(item_id = id, rows, "item deleted");
    Ok(message("Form data successfully deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
        assert!(parse_id("1.5").is_err());
    }
}
