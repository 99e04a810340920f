use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_brands::Entity")]
    ProductBrands,
}

impl Related<super::product_brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductBrands.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
