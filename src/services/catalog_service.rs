use crate::entities::{brand_entity as brands, pricing_type_entity as pricing_types};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_brands(&self, actor: &AuthUser) -> AppResult<Vec<BrandResponse>> {
        actor.require_admin()?;
        let rows = brands::Entity::find()
            .order_by_desc(brands::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BrandResponse::from).collect())
    }

    pub async fn create_brand(
        &self,
        actor: &AuthUser,
        request: CreateBrandRequest,
    ) -> AppResult<BrandResponse> {
        actor.require_admin()?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Brand name must not be empty".to_string(),
            ));
        }

        let brand = brands::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            logo: Set(request.logo),
        }
        .insert(&self.pool)
        .await?;

        Ok(BrandResponse::from(brand))
    }

    pub async fn list_pricing_types(&self, actor: &AuthUser) -> AppResult<Vec<PricingTypeResponse>> {
        actor.require_admin()?;
        let rows = pricing_types::Entity::find()
            .order_by_asc(pricing_types::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PricingTypeResponse::from).collect())
    }
}
