use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::VehicleService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

fn current_user(req: &HttpRequest) -> AppResult<AuthUser> {
    req.extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "vehicle",
    responses(
        (status = 200, description = "Vehicle list with prices and availability", body = Vec<VehicleResponse>)
    )
)]
pub async fn list_vehicles(vehicle_service: web::Data<VehicleService>) -> Result<HttpResponse> {
    match vehicle_service.list_vehicles().await {
        Ok(vehicles) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": vehicles
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "vehicle",
    request_body = CreateVehicleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Brand or pricing type not found")
    )
)]
pub async fn create_vehicle(
    vehicle_service: web::Data<VehicleService>,
    req: HttpRequest,
    body: web::Json<CreateVehicleRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match vehicle_service
        .create_vehicle(&user, body.into_inner())
        .await
    {
        Ok(vehicle) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": vehicle
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/vehicles/{id}",
    tag = "vehicle",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    request_body = UpdateVehicleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn update_vehicle(
    vehicle_service: web::Data<VehicleService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVehicleRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match vehicle_service
        .update_vehicle(&user, path.into_inner(), body.into_inner())
        .await
    {
        Ok(vehicle) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": vehicle
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    tag = "vehicle",
    params(("id" = Uuid, Path, description = "Vehicle id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle deleted", body = DeletedVehicleResponse),
        (status = 400, description = "Vehicle has rental history"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    vehicle_service: web::Data<VehicleService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match vehicle_service.delete_vehicle(&user, path.into_inner()).await {
        Ok(vehicle) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": vehicle
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn vehicle_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vehicles")
            .route("", web::get().to(list_vehicles))
            .route("", web::post().to(create_vehicle))
            .route("/{id}", web::patch().to(update_vehicle))
            .route("/{id}", web::delete().to(delete_vehicle)),
    );
}
