use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::RentalService;
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
    path = "/rentals/mine",
    tag = "rental",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's running rentals", body = Vec<OrderResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_rentals(
    rental_service: web::Data<RentalService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match rental_service.my_rentals(user.id).await {
        Ok(rentals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rentals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn rental_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/rentals").route("/mine", web::get().to(my_rentals)));
}
