#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use torent_backend::config::DatabaseConfig;
use torent_backend::database::{create_pool, run_migrations};
use torent_backend::entities::{
    OrderStatus, UserRole, order_entity as orders, order_item_entity as order_items,
    pricing_type_entity as pricing_types, product_entity as products,
    product_price_entity as product_prices, user_entity as users,
};
use torent_backend::models::{AuthUser, CreateOrderRequest, OrderItemRequest, OrderResponse};
use torent_backend::services::OrderService;
use uuid::Uuid;

/// Fresh in-memory database with the real migrations (and catalog seed)
/// applied. One connection so every query sees the same memory store.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("connect to sqlite");
    run_migrations(&pool).await.expect("apply migrations");
    pool
}

pub async fn seed_user(
    pool: &DatabaseConnection,
    name: &str,
    email: &str,
    role: UserRole,
) -> users::Model {
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role),
        created_at: Set(Utc::now()),
    }
    .insert(pool)
    .await
    .expect("insert user")
}

pub async fn admin_actor(pool: &DatabaseConnection) -> AuthUser {
    let user = seed_user(pool, "Fleet Admin", "fleet-admin@test.dev", UserRole::Admin).await;
    AuthUser {
        id: user.id,
        role: UserRole::Admin,
    }
}

pub async fn customer_actor(pool: &DatabaseConnection, email: &str) -> AuthUser {
    let user = seed_user(pool, "Test Renter", email, UserRole::Customer).await;
    AuthUser {
        id: user.id,
        role: UserRole::Customer,
    }
}

pub async fn seed_vehicle(pool: &DatabaseConnection, model_name: &str) -> products::Model {
    products::ActiveModel {
        id: Set(Uuid::new_v4()),
        model_name: Set(model_name.to_string()),
        image: Set(None),
        deleted_at: Set(None),
    }
    .insert(pool)
    .await
    .expect("insert vehicle")
}

pub async fn seed_pricing_type(pool: &DatabaseConnection, name: &str) -> pricing_types::Model {
    pricing_types::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    }
    .insert(pool)
    .await
    .expect("insert pricing type")
}

pub async fn seed_price(
    pool: &DatabaseConnection,
    product_id: Uuid,
    pricing_type_id: Uuid,
    price_cents: i64,
) {
    product_prices::ActiveModel {
        product_id: Set(product_id),
        pricing_type_id: Set(pricing_type_id),
        price_cents: Set(price_cents),
    }
    .insert(pool)
    .await
    .expect("insert price");
}

pub fn item(
    product_id: Uuid,
    pricing_type_id: Uuid,
    quantity: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> OrderItemRequest {
    OrderItemRequest {
        product_id,
        pricing_type_id,
        quantity,
        start_date: start,
        end_date: end,
    }
}

/// Seeds a throwaway vehicle and tier, then checks out one line on them.
pub async fn checkout_single(
    pool: &DatabaseConnection,
    service: &OrderService,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> OrderResponse {
    let car = seed_vehicle(pool, "Metro Hatch").await;
    let tier = seed_pricing_type(pool, &format!("Tier {}", Uuid::new_v4())).await;
    seed_price(pool, car.id, tier.id, 5_000).await;
    service
        .create_order(
            user_id,
            CreateOrderRequest {
                items: vec![item(car.id, tier.id, 1, start, end)],
            },
        )
        .await
        .expect("checkout")
}

/// Inserts an order with one item directly, bypassing checkout, for tests
/// that need a precise starting state.
pub async fn seed_order_with_item(
    pool: &DatabaseConnection,
    user_id: Uuid,
    status: OrderStatus,
    product_id: Uuid,
    pricing_type_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> orders::Model {
    let now = Utc::now();
    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        status: Set(status),
        total_amount_cents: Set(5_000),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(pool)
    .await
    .expect("insert order");

    seed_item(pool, order.id, product_id, pricing_type_id, start, end).await;
    order
}

pub async fn seed_item(
    pool: &DatabaseConnection,
    order_id: Uuid,
    product_id: Uuid,
    pricing_type_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    order_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order_id),
        product_id: Set(product_id),
        pricing_type_id: Set(pricing_type_id),
        quantity: Set(1),
        price_snapshot_cents: Set(5_000),
        start_date: Set(start),
        end_date: Set(end),
    }
    .insert(pool)
    .await
    .expect("insert order item");
}

pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(hours)
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}
