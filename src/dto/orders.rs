use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Quantity as the front end sends it: either a JSON number or the
/// numeric string a form field produces.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Quantity {
    Count(i64),
    Text(String),
}

impl Quantity {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Quantity::Count(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    /// Menu item name; the field is called `order` on the wire.
    pub order: Option<String>,
    pub quantity: Option<Quantity>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    pub message: String,
    pub order_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemView {
    pub menu_item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub order_time: DateTime<Utc>,
    pub total_amount: f64,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}
