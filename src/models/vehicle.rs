use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehiclePriceEntry {
    pub pricing_type_id: Uuid,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub model_name: String,
    pub image: Option<String>,
    pub brand_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub prices: Vec<VehiclePriceEntry>,
    /// False while some confirmed or active rental covers the current
    /// instant. Advisory only; checkout is not blocked by it.
    pub is_available: bool,
}

/// `prices` maps pricing type id to unit price in cents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateVehicleRequest {
    pub model_name: String,
    pub image: Option<String>,
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub prices: HashMap<Uuid, i64>,
}

/// Brand and price associations are replaced wholesale on every edit;
/// omitting them clears the association.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateVehicleRequest {
    pub model_name: Option<String>,
    pub image: Option<String>,
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub prices: HashMap<Uuid, i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedVehicleResponse {
    pub id: Uuid,
    pub model_name: String,
    pub image: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}
