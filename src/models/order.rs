use crate::entities::{OrderStatus, order_entity, user_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub pricing_type_id: Uuid,
    /// Number of tier-periods, e.g. 3 for "3 days" on the Daily tier.
    pub quantity: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub pricing_type_id: Uuid,
    pub pricing_type_name: String,
    pub quantity: i32,
    pub price_snapshot_cents: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub status: OrderStatus,
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_model(order: order_entity::Model, items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total_amount_cents: order.total_amount_cents,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenterSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&user_entity::Model> for RenterSummary {
    fn from(user: &user_entity::Model) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Admin-side view of an order, renter identity included.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentalResponse {
    pub id: Uuid,
    pub status: OrderStatus,
    pub total_amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub renter: RenterSummary,
    pub items: Vec<OrderItemResponse>,
}

impl RentalResponse {
    pub fn from_model(
        order: order_entity::Model,
        renter: RenterSummary,
        items: Vec<OrderItemResponse>,
    ) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total_amount_cents: order.total_amount_cents,
            created_at: order.created_at,
            updated_at: order.updated_at,
            renter,
            items,
        }
    }
}
