use crate::entities::{brand_entity, pricing_type_entity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
}

impl From<brand_entity::Model> for BrandResponse {
    fn from(m: brand_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            logo: m.logo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBrandRequest {
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PricingTypeResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<pricing_type_entity::Model> for PricingTypeResponse {
    fn from(m: pricing_type_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
