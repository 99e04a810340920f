use crate::entities::{
    OrderStatus, order_entity as orders, order_item_entity as order_items,
    pricing_type_entity as pricing_types, product_entity as products,
    product_price_entity as product_prices, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::billable_periods;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Checkout. Prices are resolved from the stored price list and frozen
    /// onto the items; one missing price aborts the whole order.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        if request.items.is_empty() {
            return Err(AppError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }
        if request.items.iter().any(|item| item.quantity < 1) {
            return Err(AppError::ValidationError(
                "Item quantity must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let txn = self.pool.begin().await?;

        users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::AuthError("Unknown user".to_string()))?;

        let mut total_cents: i64 = 0;
        let mut item_rows = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let price = product_prices::Entity::find_by_id((item.product_id, item.pricing_type_id))
                .one(&txn)
                .await?
                .ok_or(AppError::PriceNotFound {
                    product_id: item.product_id,
                    pricing_type_id: item.pricing_type_id,
                })?;

            let periods = billable_periods(item.start_date, item.end_date);
            total_cents += price.price_cents * periods * item.quantity as i64;

            item_rows.push(order_items::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(item.product_id),
                pricing_type_id: Set(item.pricing_type_id),
                quantity: Set(item.quantity),
                price_snapshot_cents: Set(price.price_cents),
                start_date: Set(item.start_date),
                end_date: Set(item.end_date),
            });
        }

        let order = orders::ActiveModel {
            id: Set(order_id),
            user_id: Set(user_id),
            status: Set(OrderStatus::Pending),
            total_amount_cents: Set(total_cents),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        order_items::Entity::insert_many(item_rows).exec(&txn).await?;
        txn.commit().await?;

        log::info!(
            "Created order {} for user {} ({} cents)",
            order.id,
            user_id,
            total_cents
        );
        self.order_with_items(order).await
    }

    pub async fn list_user_orders(&self, user_id: Uuid) -> AppResult<Vec<OrderResponse>> {
        let order_rows = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let order_ids: Vec<Uuid> = order_rows.iter().map(|o| o.id).collect();
        let mut items = self.item_responses_for(&order_ids).await?;

        Ok(order_rows
            .into_iter()
            .map(|order| {
                let order_items = items.remove(&order.id).unwrap_or_default();
                OrderResponse::from_model(order, order_items)
            })
            .collect())
    }

    pub async fn get_order(&self, order_id: Uuid) -> AppResult<OrderResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        self.order_with_items(order).await
    }

    /// `Pending -> Confirmed`.
    pub async fn accept_order(&self, actor: &AuthUser, order_id: Uuid) -> AppResult<OrderResponse> {
        actor.require_admin()?;
        let order = self
            .transition(
                order_id,
                "accept",
                &[OrderStatus::Pending],
                OrderStatus::Confirmed,
            )
            .await?;
        self.order_with_items(order).await
    }

    /// `Confirmed -> Active`. The pickup time replaces the requested start
    /// date on every item; status flip and date rewrite commit together.
    pub async fn activate_order(
        &self,
        actor: &AuthUser,
        order_id: Uuid,
    ) -> AppResult<OrderResponse> {
        actor.require_admin()?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let now = Utc::now();
        let txn = self.pool.begin().await?;

        let updated = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(OrderStatus::Active))
            .col_expr(orders::Column::UpdatedAt, Expr::value(now))
            .filter(orders::Column::Id.eq(order_id))
            .filter(orders::Column::Status.eq(OrderStatus::Confirmed))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(AppError::InvalidStateTransition {
                action: "activate".to_string(),
                status: order.status.to_string(),
            });
        }

        order_items::Entity::update_many()
            .col_expr(order_items::Column::StartDate, Expr::value(now))
            .filter(order_items::Column::OrderId.eq(order_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!("Activated order {order_id}");
        self.get_order(order_id).await
    }

    /// `Pending | Confirmed -> Cancelled`.
    pub async fn cancel_order(&self, actor: &AuthUser, order_id: Uuid) -> AppResult<OrderResponse> {
        actor.require_admin()?;
        let order = self
            .transition(
                order_id,
                "cancel",
                &[OrderStatus::Pending, OrderStatus::Confirmed],
                OrderStatus::Cancelled,
            )
            .await?;
        self.order_with_items(order).await
    }

    /// Completes every active order whose items have all ended. One
    /// conditional bulk update; repeat calls are no-ops until more orders
    /// expire.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        let now = Utc::now();
        let still_running = Query::select()
            .column(order_items::Column::OrderId)
            .from(order_items::Entity)
            .and_where(order_items::Column::EndDate.gte(now))
            .to_owned();

        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(OrderStatus::Completed))
            .col_expr(orders::Column::UpdatedAt, Expr::value(now))
            .filter(orders::Column::Status.eq(OrderStatus::Active))
            .filter(orders::Column::Id.not_in_subquery(still_running))
            .exec(&self.pool)
            .await?;

        if result.rows_affected > 0 {
            log::info!("Swept {} expired orders to completed", result.rows_affected);
        }
        Ok(result.rows_affected)
    }

    /// Conditional status flip gated on the allowed source states. Zero rows
    /// touched on an existing order means its status sits outside `allowed`.
    async fn transition(
        &self,
        order_id: Uuid,
        action: &str,
        allowed: &[OrderStatus],
        next: OrderStatus,
    ) -> AppResult<orders::Model> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(next))
            .col_expr(orders::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(orders::Column::Id.eq(order_id))
            .filter(orders::Column::Status.is_in(allowed.iter().cloned()))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStateTransition {
                action: action.to_string(),
                status: order.status.to_string(),
            });
        }

        log::info!("Order {order_id}: {action} applied from {}", order.status);
        orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    async fn order_with_items(&self, order: orders::Model) -> AppResult<OrderResponse> {
        let mut items = self.item_responses_for(&[order.id]).await?;
        let order_items = items.remove(&order.id).unwrap_or_default();
        Ok(OrderResponse::from_model(order, order_items))
    }

    /// Items of the given orders with vehicle and tier names resolved,
    /// grouped per order and sorted by start date.
    pub(crate) async fn item_responses_for(
        &self,
        order_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<OrderItemResponse>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(order_items::Column::StartDate)
            .all(&self.pool)
            .await?;

        let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        let product_names: HashMap<Uuid, String> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p.model_name))
            .collect();

        let tier_ids: Vec<Uuid> = items.iter().map(|i| i.pricing_type_id).collect();
        let tier_names: HashMap<Uuid, String> = pricing_types::Entity::find()
            .filter(pricing_types::Column::Id.is_in(tier_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        let mut by_order: HashMap<Uuid, Vec<OrderItemResponse>> = HashMap::new();
        for item in items {
            by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItemResponse {
                    id: item.id,
                    product_id: item.product_id,
                    product_name: product_names
                        .get(&item.product_id)
                        .cloned()
                        .unwrap_or_default(),
                    pricing_type_id: item.pricing_type_id,
                    pricing_type_name: tier_names
                        .get(&item.pricing_type_id)
                        .cloned()
                        .unwrap_or_default(),
                    quantity: item.quantity,
                    price_snapshot_cents: item.price_snapshot_cents,
                    start_date: item.start_date,
                    end_date: item.end_date,
                });
        }
        Ok(by_order)
    }
}
