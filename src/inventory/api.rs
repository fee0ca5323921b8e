//! Inventory API Endpoints
//! Mission: Item CRUD with boundary validation and markup stripping

use crate::inventory::{
    models::{CreateItemRequest, CreateItemResponse, ItemListResponse, UpdateItemRequest},
    store::ItemStore,
};
use crate::models::{parse_object, MessageResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

lazy_static! {
    static ref SCRIPT_TAG_RE: Regex = Regex::new(r"(?is)<script.*?>.*?</script>").unwrap();
}

/// Longest accepted item name
const MAX_ITEM_NAME_LEN: usize = 255;

/// Shared inventory state
#[derive(Clone)]
pub struct ItemsState {
    pub item_store: Arc<ItemStore>,
}

/// List endpoint - GET /all_items
pub async fn all_items(
    State(state): State<ItemsState>,
) -> Result<Json<ItemListResponse>, ItemApiError> {
    let items = state.item_store.all_items().await.map_err(|e| {
        warn!("Failed to list items: {}", e);
        ItemApiError::Internal
    })?;

    Ok(Json(ItemListResponse { items }))
}

/// Create endpoint - POST /create_item (admin)
pub async fn create_item(
    State(state): State<ItemsState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateItemResponse>), ItemApiError> {
    let Json(value) = payload.map_err(|_| ItemApiError::InvalidPayload)?;
    let payload: CreateItemRequest = parse_object(value).ok_or(ItemApiError::InvalidPayload)?;

    let (Some(name_value), Some(quantity_value)) = (payload.item_name, payload.item_quantity)
    else {
        return Err(ItemApiError::MissingFields);
    };

    let name = parse_item_name(&name_value)?;
    let quantity = parse_item_quantity(&quantity_value)?;
    let name = sanitize_item_name(name);

    let item = state
        .item_store
        .create_item(&name, quantity)
        .await
        .map_err(|e| {
            warn!("Failed to create item: {}", e);
            ItemApiError::Internal
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateItemResponse {
            message: "Item created!".to_string(),
            item,
        }),
    ))
}

/// Update endpoint - PUT /update/item/:id (admin, moderator)
pub async fn update_item(
    State(state): State<ItemsState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ItemApiError> {
    // Non-integer ids behave like missing rows
    let Ok(item_id) = id.parse::<i64>() else {
        return Err(ItemApiError::NotFound);
    };

    let Json(value) = payload.map_err(|_| ItemApiError::InvalidPayload)?;
    let payload: UpdateItemRequest = parse_object(value).ok_or(ItemApiError::InvalidPayload)?;

    let name = match &payload.item_name {
        Some(value) => Some(sanitize_item_name(parse_item_name(value)?)),
        None => None,
    };
    let quantity = match &payload.item_quantity {
        Some(value) => Some(parse_item_quantity(value)?),
        None => None,
    };

    let updated = state
        .item_store
        .update_item(item_id, name.as_deref(), quantity)
        .await
        .map_err(|e| {
            warn!("Failed to update item {}: {}", item_id, e);
            ItemApiError::Internal
        })?;

    if !updated {
        return Err(ItemApiError::NotFound);
    }

    Ok(Json(MessageResponse::new("Item updated!")))
}

/// Delete endpoint - DELETE /delete/item/:id (admin)
pub async fn delete_item(
    State(state): State<ItemsState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ItemApiError> {
    let Ok(item_id) = id.parse::<i64>() else {
        return Err(ItemApiError::NotFound);
    };

    let deleted = state.item_store.delete_item(item_id).await.map_err(|e| {
        warn!("Failed to delete item {}: {}", item_id, e);
        ItemApiError::Internal
    })?;

    if !deleted {
        return Err(ItemApiError::NotFound);
    }

    Ok(Json(MessageResponse::new("Item deleted!")))
}

fn parse_item_name(value: &Value) -> Result<&str, ItemApiError> {
    let name = value.as_str().ok_or(ItemApiError::InvalidName)?;
    if name.is_empty() || name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ItemApiError::InvalidName);
    }
    Ok(name)
}

fn parse_item_quantity(value: &Value) -> Result<i64, ItemApiError> {
    let quantity = value.as_i64().ok_or(ItemApiError::InvalidQuantity)?;
    if quantity < 0 {
        return Err(ItemApiError::InvalidQuantity);
    }
    Ok(quantity)
}

/// Strip script-tag markup from an item name before storage
fn sanitize_item_name(name: &str) -> String {
    SCRIPT_TAG_RE.replace_all(name, "").to_string()
}

/// Item API errors
#[derive(Debug)]
pub enum ItemApiError {
    InvalidPayload,
    MissingFields,
    InvalidName,
    InvalidQuantity,
    NotFound,
    Internal,
}

impl IntoResponse for ItemApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ItemApiError::InvalidPayload => (StatusCode::BAD_REQUEST, "Invalid payload"),
            ItemApiError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            ItemApiError::InvalidName => (StatusCode::BAD_REQUEST, "Invalid item_name"),
            ItemApiError::InvalidQuantity => (StatusCode::BAD_REQUEST, "Invalid item_quantity"),
            ItemApiError::NotFound => (StatusCode::NOT_FOUND, "Item not found"),
            ItemApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
