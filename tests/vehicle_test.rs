mod common;

use chrono::Duration;
use common::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::collections::HashMap;
use torent_backend::entities::{OrderStatus, product_price_entity as product_prices};
use torent_backend::error::AppError;
use torent_backend::models::{CreateBrandRequest, CreateVehicleRequest, UpdateVehicleRequest};
use torent_backend::services::{CatalogService, UserService, VehicleService};
use uuid::Uuid;

#[tokio::test]
async fn test_listing_flags_rented_vehicles_unavailable() {
    let pool = setup_db().await;
    let service = VehicleService::new(pool.clone());
    let renter = customer_actor(&pool, "flags@test.dev").await;

    let rented = seed_vehicle(&pool, "Aurora GT").await;
    let free = seed_vehicle(&pool, "Cargo Max").await;
    let pending_only = seed_vehicle(&pool, "City Mini").await;
    let cancelled_only = seed_vehicle(&pool, "Dune Rover").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Confirmed,
        rented.id,
        daily.id,
        hours_from_now(-1),
        hours_from_now(5),
    )
    .await;
    // a pending order does not block the calendar
    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Pending,
        pending_only.id,
        daily.id,
        hours_from_now(-1),
        hours_from_now(5),
    )
    .await;
    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Cancelled,
        cancelled_only.id,
        daily.id,
        hours_from_now(-1),
        hours_from_now(5),
    )
    .await;

    let listed = service.list_vehicles().await.expect("list");
    assert_eq!(listed.len(), 4);
    let availability: HashMap<Uuid, bool> =
        listed.iter().map(|v| (v.id, v.is_available)).collect();
    assert!(!availability[&rented.id]);
    assert!(availability[&free.id]);
    assert!(availability[&pending_only.id]);
    assert!(availability[&cancelled_only.id]);
}

#[tokio::test]
async fn test_availability_interval_is_inclusive_on_both_ends() {
    let pool = setup_db().await;
    let service = VehicleService::new(pool.clone());
    let renter = customer_actor(&pool, "interval@test.dev").await;

    let car = seed_vehicle(&pool, "Aurora GT").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;
    let start = hours_from_now(2);
    let end = hours_from_now(26);
    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Active,
        car.id,
        daily.id,
        start,
        end,
    )
    .await;

    let at_start = service.unavailable_vehicle_ids(start).await.expect("query");
    assert!(at_start.contains(&car.id));
    let at_end = service.unavailable_vehicle_ids(end).await.expect("query");
    assert!(at_end.contains(&car.id));

    let before = service
        .unavailable_vehicle_ids(start - Duration::seconds(1))
        .await
        .expect("query");
    assert!(!before.contains(&car.id));
    let after = service
        .unavailable_vehicle_ids(end + Duration::seconds(1))
        .await
        .expect("query");
    assert!(!after.contains(&car.id));
}

#[tokio::test]
async fn test_create_vehicle_with_brand_and_prices() {
    let pool = setup_db().await;
    let vehicles = VehicleService::new(pool.clone());
    let catalog = CatalogService::new(pool.clone());
    let admin = admin_actor(&pool).await;
    let renter = customer_actor(&pool, "noadmin@test.dev").await;

    let brand = catalog
        .create_brand(
            &admin,
            CreateBrandRequest {
                name: "Aurora Motors".to_string(),
                logo: None,
            },
        )
        .await
        .expect("create brand");
    let daily = seed_pricing_type(&pool, "Test Daily").await;

    let created = vehicles
        .create_vehicle(
            &admin,
            CreateVehicleRequest {
                model_name: "  Polar SUV  ".to_string(),
                image: Some("polar.png".to_string()),
                brand_id: Some(brand.id),
                prices: HashMap::from([(daily.id, 7_500)]),
            },
        )
        .await
        .expect("create vehicle");

    assert_eq!(created.model_name, "Polar SUV");
    assert_eq!(created.brand_name.as_deref(), Some("Aurora Motors"));
    assert_eq!(created.prices.len(), 1);
    assert_eq!(created.prices[0].price_cents, 7_500);
    assert_eq!(created.prices[0].name, "Test Daily");
    assert!(created.is_available);

    let err = vehicles
        .create_vehicle(
            &renter,
            CreateVehicleRequest {
                model_name: "Rogue Coupe".to_string(),
                image: None,
                brand_id: None,
                prices: HashMap::new(),
            },
        )
        .await
        .expect_err("customers cannot create vehicles");
    assert!(matches!(err, AppError::PermissionDenied));

    let err = vehicles
        .create_vehicle(
            &admin,
            CreateVehicleRequest {
                model_name: "Ghost Wagon".to_string(),
                image: None,
                brand_id: Some(Uuid::new_v4()),
                prices: HashMap::new(),
            },
        )
        .await
        .expect_err("unknown brand");
    assert!(matches!(err, AppError::NotFound(_)));

    let err = vehicles
        .create_vehicle(
            &admin,
            CreateVehicleRequest {
                model_name: "Budget Buggy".to_string(),
                image: None,
                brand_id: None,
                prices: HashMap::from([(daily.id, -100)]),
            },
        )
        .await
        .expect_err("negative price");
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_update_vehicle_replaces_brand_and_prices_wholesale() {
    let pool = setup_db().await;
    let vehicles = VehicleService::new(pool.clone());
    let catalog = CatalogService::new(pool.clone());
    let admin = admin_actor(&pool).await;

    let first_brand = catalog
        .create_brand(&admin, CreateBrandRequest { name: "Aurora Motors".to_string(), logo: None })
        .await
        .expect("brand");
    let second_brand = catalog
        .create_brand(&admin, CreateBrandRequest { name: "Borealis Cars".to_string(), logo: None })
        .await
        .expect("brand");
    let daily = seed_pricing_type(&pool, "Test Daily").await;
    let weekly = seed_pricing_type(&pool, "Test Weekly").await;

    let created = vehicles
        .create_vehicle(
            &admin,
            CreateVehicleRequest {
                model_name: "Polar SUV".to_string(),
                image: None,
                brand_id: Some(first_brand.id),
                prices: HashMap::from([(daily.id, 7_500)]),
            },
        )
        .await
        .expect("create");

    let updated = vehicles
        .update_vehicle(
            &admin,
            created.id,
            UpdateVehicleRequest {
                model_name: None,
                image: None,
                brand_id: Some(second_brand.id),
                prices: HashMap::from([(weekly.id, 40_000)]),
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.brand_name.as_deref(), Some("Borealis Cars"));
    assert_eq!(updated.prices.len(), 1);
    assert_eq!(updated.prices[0].pricing_type_id, weekly.id);
    assert_eq!(updated.prices[0].price_cents, 40_000);

    let remaining = product_prices::Entity::find()
        .filter(product_prices::Column::ProductId.eq(created.id))
        .all(&pool)
        .await
        .expect("query prices");
    assert_eq!(remaining.len(), 1);

    // an edit that carries no links clears them
    let renamed = vehicles
        .update_vehicle(
            &admin,
            created.id,
            UpdateVehicleRequest {
                model_name: Some("Polar SUV II".to_string()),
                image: None,
                brand_id: None,
                prices: HashMap::new(),
            },
        )
        .await
        .expect("rename");
    assert_eq!(renamed.model_name, "Polar SUV II");
    assert_eq!(renamed.brand_name, None);
    assert!(renamed.prices.is_empty());
}

#[tokio::test]
async fn test_delete_vehicle_guards_rental_history() {
    let pool = setup_db().await;
    let service = VehicleService::new(pool.clone());
    let admin = admin_actor(&pool).await;
    let renter = customer_actor(&pool, "history@test.dev").await;

    let rented = seed_vehicle(&pool, "Aurora GT").await;
    let fresh = seed_vehicle(&pool, "Cargo Max").await;
    let daily = seed_pricing_type(&pool, "Test Daily").await;
    seed_order_with_item(
        &pool,
        renter.id,
        OrderStatus::Completed,
        rented.id,
        daily.id,
        hours_from_now(-48),
        hours_from_now(-24),
    )
    .await;

    let err = service
        .delete_vehicle(&admin, rented.id)
        .await
        .expect_err("rental history blocks deletion");
    assert!(matches!(err, AppError::ValidationError(_)));

    let deleted = service.delete_vehicle(&admin, fresh.id).await.expect("delete");
    assert_eq!(deleted.id, fresh.id);
    assert_eq!(deleted.model_name, "Cargo Max");

    let listed = service.list_vehicles().await.expect("list");
    assert!(listed.iter().all(|v| v.id != fresh.id));

    let err = service
        .delete_vehicle(&admin, Uuid::new_v4())
        .await
        .expect_err("unknown vehicle");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_brand_and_pricing_type_listing() {
    let pool = setup_db().await;
    let catalog = CatalogService::new(pool.clone());
    let admin = admin_actor(&pool).await;
    let renter = customer_actor(&pool, "catalog@test.dev").await;

    catalog
        .create_brand(&admin, CreateBrandRequest { name: "Audi".to_string(), logo: None })
        .await
        .expect("brand");
    catalog
        .create_brand(&admin, CreateBrandRequest { name: "BMW".to_string(), logo: None })
        .await
        .expect("brand");

    let brands = catalog.list_brands(&admin).await.expect("list brands");
    let names: Vec<&str> = brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["BMW", "Audi"]);

    let err = catalog
        .create_brand(&admin, CreateBrandRequest { name: "   ".to_string(), logo: None })
        .await
        .expect_err("blank brand name");
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = catalog
        .list_brands(&renter)
        .await
        .expect_err("customers cannot list brands");
    assert!(matches!(err, AppError::PermissionDenied));

    // the stock rental tiers, alphabetical
    let tiers = catalog.list_pricing_types(&admin).await.expect("tiers");
    let names: Vec<&str> = tiers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Daily", "Monthly", "Weekly"]);
}

#[tokio::test]
async fn test_user_directory_admin_only_and_ordered() {
    let pool = setup_db().await;
    let service = UserService::new(pool.clone());
    let admin = admin_actor(&pool).await;
    let renter = customer_actor(&pool, "directory@test.dev").await;

    let err = service
        .list_users(&renter)
        .await
        .expect_err("customers cannot list users");
    assert!(matches!(err, AppError::PermissionDenied));

    // the two bootstrap accounts plus the two seeded here
    let listed = service.list_users(&admin).await.expect("list users");
    assert_eq!(listed.len(), 4);
    assert!(
        listed
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
    assert!(listed.iter().any(|u| u.email == "admin@torent.dev"));
    assert_eq!(listed[3].email, "directory@test.dev");
}
