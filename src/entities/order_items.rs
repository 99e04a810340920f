use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// One rental line: a vehicle booked under one pricing tier for a date
/// range. `price_snapshot_cents` is frozen at checkout; `start_date` is
/// rewritten once when the order is activated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub pricing_type_id: Uuid,
    pub quantity: i32,
    pub price_snapshot_cents: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
    #[sea_orm(
        belongs_to = "super::pricing_types::Entity",
        from = "Column::PricingTypeId",
        to = "super::pricing_types::Column::Id"
    )]
    PricingTypes,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::pricing_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
