use crate::entities::{
    OrderStatus, brand_entity as brands, order_entity as orders, order_item_entity as order_items,
    pricing_type_entity as pricing_types, product_brand_entity as product_brands,
    product_entity as products, product_price_entity as product_prices,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Clone)]
pub struct VehicleService {
    pool: DatabaseConnection,
}

impl VehicleService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Public browse list: every vehicle with its brand, tier prices and a
    /// point-in-time availability flag.
    pub async fn list_vehicles(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = products::Entity::find()
            .order_by_desc(products::Column::Id)
            .all(&self.pool)
            .await?;

        let brand_rows = product_brands::Entity::find()
            .find_also_related(brands::Entity)
            .all(&self.pool)
            .await?;
        let mut brand_by_vehicle: HashMap<Uuid, (Uuid, String)> = HashMap::new();
        for (link, brand) in brand_rows {
            if let Some(brand) = brand {
                brand_by_vehicle
                    .entry(link.product_id)
                    .or_insert((brand.id, brand.name));
            }
        }

        let price_rows = product_prices::Entity::find()
            .find_also_related(pricing_types::Entity)
            .all(&self.pool)
            .await?;
        let mut prices_by_vehicle: HashMap<Uuid, Vec<VehiclePriceEntry>> = HashMap::new();
        for (price, tier) in price_rows {
            prices_by_vehicle
                .entry(price.product_id)
                .or_default()
                .push(VehiclePriceEntry {
                    pricing_type_id: price.pricing_type_id,
                    name: tier.map(|t| t.name).unwrap_or_default(),
                    price_cents: price.price_cents,
                });
        }

        let unavailable = self.unavailable_vehicle_ids(Utc::now()).await?;

        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let (brand_id, brand_name) = match brand_by_vehicle.get(&vehicle.id) {
                    Some((id, name)) => (Some(*id), Some(name.clone())),
                    None => (None, None),
                };
                let mut prices = prices_by_vehicle.remove(&vehicle.id).unwrap_or_default();
                prices.sort_by(|a, b| a.name.cmp(&b.name));
                VehicleResponse {
                    id: vehicle.id,
                    model_name: vehicle.model_name,
                    image: vehicle.image,
                    brand_id,
                    brand_name,
                    prices,
                    is_available: !unavailable.contains(&vehicle.id),
                }
            })
            .collect())
    }

    /// Vehicle ids covered by a confirmed or active rental at `now`
    /// (item interval inclusive on both ends).
    pub async fn unavailable_vehicle_ids(&self, now: DateTime<Utc>) -> AppResult<HashSet<Uuid>> {
        #[derive(Debug, sea_orm::FromQueryResult)]
        struct VehicleIdRow {
            product_id: Uuid,
        }

        let rows = order_items::Entity::find()
            .select_only()
            .column_as(order_items::Column::ProductId, "product_id")
            .distinct()
            .join(JoinType::InnerJoin, order_items::Relation::Orders.def())
            .filter(orders::Column::Status.is_in([OrderStatus::Confirmed, OrderStatus::Active]))
            .filter(order_items::Column::StartDate.lte(now))
            .filter(order_items::Column::EndDate.gte(now))
            .into_model::<VehicleIdRow>()
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.product_id).collect())
    }

    pub async fn create_vehicle(
        &self,
        actor: &AuthUser,
        request: CreateVehicleRequest,
    ) -> AppResult<VehicleResponse> {
        actor.require_admin()?;
        let model_name = request.model_name.trim();
        if model_name.is_empty() {
            return Err(AppError::ValidationError(
                "Vehicle model name must not be empty".to_string(),
            ));
        }
        if request.prices.values().any(|cents| *cents < 0) {
            return Err(AppError::ValidationError(
                "Vehicle prices must not be negative".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        if let Some(brand_id) = request.brand_id {
            brands::Entity::find_by_id(brand_id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound("Brand not found".to_string()))?;
        }
        self.ensure_pricing_types(&txn, &request.prices).await?;

        let vehicle = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            model_name: Set(model_name.to_string()),
            image: Set(request.image),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;

        if let Some(brand_id) = request.brand_id {
            product_brands::ActiveModel {
                product_id: Set(vehicle.id),
                brand_id: Set(brand_id),
            }
            .insert(&txn)
            .await?;
        }
        if !request.prices.is_empty() {
            let rows = request
                .prices
                .iter()
                .map(|(tier_id, cents)| product_prices::ActiveModel {
                    product_id: Set(vehicle.id),
                    pricing_type_id: Set(*tier_id),
                    price_cents: Set(*cents),
                });
            product_prices::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;

        log::info!("Created vehicle {} ({})", vehicle.id, vehicle.model_name);
        self.vehicle_response(vehicle.id).await
    }

    /// Edits a vehicle. Brand and price links are replaced wholesale with
    /// whatever the request carries.
    pub async fn update_vehicle(
        &self,
        actor: &AuthUser,
        vehicle_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<VehicleResponse> {
        actor.require_admin()?;
        if let Some(name) = &request.model_name
            && name.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Vehicle model name must not be empty".to_string(),
            ));
        }
        if request.prices.values().any(|cents| *cents < 0) {
            return Err(AppError::ValidationError(
                "Vehicle prices must not be negative".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let vehicle = products::Entity::find_by_id(vehicle_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if let Some(brand_id) = request.brand_id {
            brands::Entity::find_by_id(brand_id)
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::NotFound("Brand not found".to_string()))?;
        }
        self.ensure_pricing_types(&txn, &request.prices).await?;

        let mut active = vehicle.into_active_model();
        let mut changed = false;
        if let Some(name) = request.model_name {
            active.model_name = Set(name.trim().to_string());
            changed = true;
        }
        if let Some(image) = request.image {
            active.image = Set(Some(image));
            changed = true;
        }
        if changed {
            active.update(&txn).await?;
        }

        product_brands::Entity::delete_many()
            .filter(product_brands::Column::ProductId.eq(vehicle_id))
            .exec(&txn)
            .await?;
        if let Some(brand_id) = request.brand_id {
            product_brands::ActiveModel {
                product_id: Set(vehicle_id),
                brand_id: Set(brand_id),
            }
            .insert(&txn)
            .await?;
        }

        product_prices::Entity::delete_many()
            .filter(product_prices::Column::ProductId.eq(vehicle_id))
            .exec(&txn)
            .await?;
        if !request.prices.is_empty() {
            let rows = request
                .prices
                .iter()
                .map(|(tier_id, cents)| product_prices::ActiveModel {
                    product_id: Set(vehicle_id),
                    pricing_type_id: Set(*tier_id),
                    price_cents: Set(*cents),
                });
            product_prices::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        self.vehicle_response(vehicle_id).await
    }

    /// Hard delete. Brand and price links go with it via FK cascade; vehicles
    /// referenced by order history are refused.
    pub async fn delete_vehicle(
        &self,
        actor: &AuthUser,
        vehicle_id: Uuid,
    ) -> AppResult<DeletedVehicleResponse> {
        actor.require_admin()?;

        let vehicle = products::Entity::find_by_id(vehicle_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let referenced = order_items::Entity::find()
            .filter(order_items::Column::ProductId.eq(vehicle_id))
            .one(&self.pool)
            .await?
            .is_some();
        if referenced {
            return Err(AppError::ValidationError(
                "Vehicle has rental history and cannot be deleted".to_string(),
            ));
        }

        products::Entity::delete_by_id(vehicle_id)
            .exec(&self.pool)
            .await?;

        log::info!("Deleted vehicle {} ({})", vehicle.id, vehicle.model_name);
        Ok(DeletedVehicleResponse {
            id: vehicle.id,
            model_name: vehicle.model_name,
            image: vehicle.image,
            deleted_at: vehicle.deleted_at,
        })
    }

    async fn ensure_pricing_types<C: ConnectionTrait>(
        &self,
        conn: &C,
        prices: &HashMap<Uuid, i64>,
    ) -> AppResult<()> {
        if prices.is_empty() {
            return Ok(());
        }
        let tier_ids: Vec<Uuid> = prices.keys().copied().collect();
        let found = pricing_types::Entity::find()
            .filter(pricing_types::Column::Id.is_in(tier_ids.clone()))
            .all(conn)
            .await?;
        if found.len() != tier_ids.len() {
            return Err(AppError::NotFound("Pricing type not found".to_string()));
        }
        Ok(())
    }

    async fn vehicle_response(&self, vehicle_id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = products::Entity::find_by_id(vehicle_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let brand = product_brands::Entity::find()
            .filter(product_brands::Column::ProductId.eq(vehicle_id))
            .find_also_related(brands::Entity)
            .one(&self.pool)
            .await?
            .and_then(|(_, brand)| brand);

        let price_rows = product_prices::Entity::find()
            .filter(product_prices::Column::ProductId.eq(vehicle_id))
            .find_also_related(pricing_types::Entity)
            .all(&self.pool)
            .await?;
        let mut prices: Vec<VehiclePriceEntry> = price_rows
            .into_iter()
            .map(|(price, tier)| VehiclePriceEntry {
                pricing_type_id: price.pricing_type_id,
                name: tier.map(|t| t.name).unwrap_or_default(),
                price_cents: price.price_cents,
            })
            .collect();
        prices.sort_by(|a, b| a.name.cmp(&b.name));

        let unavailable = self.unavailable_vehicle_ids(Utc::now()).await?;

        Ok(VehicleResponse {
            id: vehicle.id,
            model_name: vehicle.model_name,
            image: vehicle.image,
            brand_id: brand.as_ref().map(|b| b.id),
            brand_name: brand.map(|b| b.name),
            prices,
            is_available: !unavailable.contains(&vehicle_id),
        })
    }
}
