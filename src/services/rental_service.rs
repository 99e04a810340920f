use crate::entities::{
    OrderStatus, order_entity as orders, order_item_entity as order_items, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::OrderService;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Admin and customer projections over the order book.
#[derive(Clone)]
pub struct RentalService {
    pool: DatabaseConnection,
    order_service: OrderService,
}

impl RentalService {
    pub fn new(pool: DatabaseConnection) -> Self {
        let order_service = OrderService::new(pool.clone());
        Self {
            pool,
            order_service,
        }
    }

    /// Orders awaiting review.
    pub async fn pending_rentals(&self, actor: &AuthUser) -> AppResult<Vec<RentalResponse>> {
        actor.require_admin()?;
        self.rentals_by_status(&[OrderStatus::Pending]).await
    }

    /// Confirmed and active orders. Expired ones are swept out first.
    pub async fn active_rentals(&self, actor: &AuthUser) -> AppResult<Vec<RentalResponse>> {
        actor.require_admin()?;
        self.order_service.sweep_expired().await?;
        self.rentals_by_status(&[OrderStatus::Confirmed, OrderStatus::Active])
            .await
    }

    /// Completed and cancelled orders. Sweeps first so fresh expiries land
    /// in the history straight away.
    pub async fn rental_history(&self, actor: &AuthUser) -> AppResult<Vec<RentalResponse>> {
        actor.require_admin()?;
        self.order_service.sweep_expired().await?;
        self.rentals_by_status(&[OrderStatus::Completed, OrderStatus::Cancelled])
            .await
    }

    /// The customer's running rentals: pending and confirmed orders, plus
    /// active ones that still have an item ending in the future.
    pub async fn my_rentals(&self, user_id: Uuid) -> AppResult<Vec<OrderResponse>> {
        self.order_service.sweep_expired().await?;

        let now = Utc::now();
        let ending_later = Query::select()
            .column(order_items::Column::OrderId)
            .from(order_items::Entity)
            .and_where(order_items::Column::EndDate.gt(now))
            .to_owned();

        let order_rows = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(orders::Column::Status.is_in([OrderStatus::Pending, OrderStatus::Confirmed]))
                    .add(
                        Condition::all()
                            .add(orders::Column::Status.eq(OrderStatus::Active))
                            .add(orders::Column::Id.in_subquery(ending_later)),
                    ),
            )
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let order_ids: Vec<Uuid> = order_rows.iter().map(|o| o.id).collect();
        let mut items = self.order_service.item_responses_for(&order_ids).await?;

        Ok(order_rows
            .into_iter()
            .map(|order| {
                let order_items = items.remove(&order.id).unwrap_or_default();
                OrderResponse::from_model(order, order_items)
            })
            .collect())
    }

    async fn rentals_by_status(&self, statuses: &[OrderStatus]) -> AppResult<Vec<RentalResponse>> {
        let order_rows = orders::Entity::find()
            .filter(orders::Column::Status.is_in(statuses.iter().cloned()))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let order_ids: Vec<Uuid> = order_rows.iter().map(|o| o.id).collect();
        let mut items = self.order_service.item_responses_for(&order_ids).await?;

        let user_ids: Vec<Uuid> = order_rows
            .iter()
            .map(|o| o.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let renters: HashMap<Uuid, RenterSummary> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .iter()
            .map(|u| (u.id, RenterSummary::from(u)))
            .collect();

        order_rows
            .into_iter()
            .map(|order| {
                let renter = renters
                    .get(&order.user_id)
                    .cloned()
                    .ok_or_else(|| AppError::InternalError("Order without renter".to_string()))?;
                let order_items = items.remove(&order.id).unwrap_or_default();
                Ok(RentalResponse::from_model(order, renter, order_items))
            })
            .collect()
    }
}
