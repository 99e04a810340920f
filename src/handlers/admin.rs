use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{OrderService, RentalService, UserService};
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
    path = "/admin/rentals/pending",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders awaiting review", body = Vec<RentalResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn pending_rentals(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match rental_service.pending_rentals(&user).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rentals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/rentals/active",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Confirmed and active orders", body = Vec<RentalResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn active_rentals(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match rental_service.active_rentals(&user).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rentals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/rentals/history",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Completed and cancelled orders", body = Vec<RentalResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn rental_history(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match rental_service.rental_history(&user).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rentals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/rentals/{id}/accept",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order confirmed", body = OrderResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending")
    )
)]
pub async fn accept_rental(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match order_service.accept_order(&user, path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/rentals/{id}/activate",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order activated, item start dates set to pickup time", body = OrderResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not confirmed")
    )
)]
pub async fn activate_rental(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match order_service.activate_order(&user, path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/rentals/{id}/cancel",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is neither pending nor confirmed")
    )
)]
pub async fn cancel_rental(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match order_service.cancel_order(&user, path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Registered accounts, oldest first", body = Vec<UserResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match user_service.list_users(&user).await {
        Ok(users) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": users
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/rentals/pending", web::get().to(pending_rentals))
            .route("/rentals/active", web::get().to(active_rentals))
            .route("/rentals/history", web::get().to(rental_history))
            .route("/rentals/{id}/accept", web::post().to(accept_rental))
            .route("/rentals/{id}/activate", web::post().to(activate_rental))
            .route("/rentals/{id}/cancel", web::post().to(cancel_rental))
            .route("/users", web::get().to(list_users)),
    );
}
