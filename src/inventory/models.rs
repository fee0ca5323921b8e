//! Inventory Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Electronics item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i64,
    pub item_name: String,
    pub item_quantity: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Item creation request body. Fields arrive as raw JSON values so type
/// violations report a field-level message instead of a parser error.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub item_name: Option<Value>,
    pub item_quantity: Option<Value>,
}

/// Item update request body; omitted fields keep their stored values
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub item_name: Option<Value>,
    pub item_quantity: Option<Value>,
}

/// Item list response
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<Item>,
}

/// Item creation response
#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub message: String,
    pub item: Item,
}
