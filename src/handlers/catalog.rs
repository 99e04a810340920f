use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn current_user(req: &HttpRequest) -> AppResult<AuthUser> {
    req.extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

#[utoipa::path(
    get,
    path = "/brands",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Brand list", body = Vec<BrandResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_brands(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match catalog_service.list_brands(&user).await {
        Ok(brands) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": brands
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/brands",
    tag = "catalog",
    request_body = CreateBrandRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Empty brand name"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_brand(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    body: web::Json<CreateBrandRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match catalog_service.create_brand(&user, body.into_inner()).await {
        Ok(brand) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": brand
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pricing-types",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pricing tier list", body = Vec<PricingTypeResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_pricing_types(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match catalog_service.list_pricing_types(&user).await {
        Ok(tiers) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": tiers
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/brands")
            .route("", web::get().to(list_brands))
            .route("", web::post().to(create_brand)),
    )
    .service(web::scope("/pricing-types").route("", web::get().to(list_pricing_types)));
}
