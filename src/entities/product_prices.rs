use sea_orm::entity::prelude::*;

/// Unit price of a vehicle under one pricing tier, in integer cents.
/// The (product, tier) pair is the key; vehicle edits replace all rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "product_prices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub pricing_type_id: Uuid,
    pub price_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
