mod common;

use common::*;
use sea_orm::{DatabaseConnection, EntityTrait};
use torent_backend::entities::{OrderStatus, order_entity as orders};
use torent_backend::services::{OrderService, RentalService};
use uuid::Uuid;

async fn status_of(pool: &DatabaseConnection, id: Uuid) -> OrderStatus {
    orders::Entity::find_by_id(id)
        .one(pool)
        .await
        .expect("query order")
        .expect("order exists")
        .status
}

#[tokio::test]
async fn test_sweep_completes_only_fully_expired_active_orders() {
    let pool = setup_db().await;
    let service = OrderService::new(pool.clone());
    let renter = customer_actor(&pool, "sweep@test.dev").await;

    let car = seed_vehicle(&pool, "Aurora GT").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    let expired = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(-1),
    )
    .await;
    let running = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-2),
        hours_from_now(5),
    )
    .await;
    let confirmed_past = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Confirmed,
        car.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(-1),
    )
    .await;

    let swept = service.sweep_expired().await.expect("sweep");
    assert_eq!(swept, 1);
    assert_eq!(status_of(&pool, expired.id).await, OrderStatus::Completed);
    assert_eq!(status_of(&pool, running.id).await, OrderStatus::Active);
    // only active orders expire on their own
    assert_eq!(
        status_of(&pool, confirmed_past.id).await,
        OrderStatus::Confirmed
    );

    let swept_again = service.sweep_expired().await.expect("second sweep");
    assert_eq!(swept_again, 0);
}

#[tokio::test]
async fn test_order_with_one_running_item_stays_active() {
    let pool = setup_db().await;
    let service = OrderService::new(pool.clone());
    let renter = customer_actor(&pool, "partial@test.dev").await;

    let car = seed_vehicle(&pool, "Aurora GT").await;
    let van = seed_vehicle(&pool, "Cargo Max").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    let order = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(-2),
    )
    .await;
    seed_item(
        &pool,
        order.id,
        van.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(6),
    )
    .await;

    let swept = service.sweep_expired().await.expect("sweep");
    assert_eq!(swept, 0);
    assert_eq!(status_of(&pool, order.id).await, OrderStatus::Active);
}

#[tokio::test]
async fn test_admin_projections_sweep_before_reading() {
    let pool = setup_db().await;
    let rentals = RentalService::new(pool.clone());
    let admin = admin_actor(&pool).await;
    let renter = customer_actor(&pool, "projection@test.dev").await;

    let car = seed_vehicle(&pool, "Aurora GT").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    let expired = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(-1),
    )
    .await;
    let confirmed = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Confirmed,
        car.id,
        daily.id,
        hours_from_now(2),
        hours_from_now(26),
    )
    .await;

    let active = rentals.active_rentals(&admin).await.expect("active board");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, confirmed.id);
    assert_eq!(active[0].renter.email, "projection@test.dev");
    assert_eq!(active[0].items.len(), 1);

    let history = rentals.rental_history(&admin).await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, expired.id);
    assert_eq!(history[0].status, OrderStatus::Completed);
    assert_eq!(history[0].renter.email, "projection@test.dev");
}

#[tokio::test]
async fn test_my_rentals_keeps_running_and_upcoming_orders() {
    let pool = setup_db().await;
    let rentals = RentalService::new(pool.clone());
    let renter = customer_actor(&pool, "mine@test.dev").await;
    let other = customer_actor(&pool, "other@test.dev").await;

    let car = seed_vehicle(&pool, "Aurora GT").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    let pending = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Pending,
        car.id,
        daily.id,
        hours_from_now(48),
        hours_from_now(72),
    )
    .await;
    let confirmed = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Confirmed,
        car.id,
        daily.id,
        hours_from_now(48),
        hours_from_now(72),
    )
    .await;
    let running = seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-2),
        hours_from_now(5),
    )
    .await;
    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        hours_from_now(-26),
        hours_from_now(-1),
    )
    .await;
    seed_order_with_item(
        &pool,
        other.id,
        OrderStatus::Pending,
        car.id,
        daily.id,
        hours_from_now(48),
        hours_from_now(72),
    )
    .await;

    let mine = rentals.my_rentals(renter.id).await.expect("my rentals");
    let ids: Vec<Uuid> = mine.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![running.id, confirmed.id, pending.id]);
    assert!(mine.iter().all(|o| !o.items.is_empty()));
}
