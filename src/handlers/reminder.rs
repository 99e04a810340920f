use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::ReminderService;
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
    path = "/reminders",
    tag = "reminder",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rentals starting or ending within 24 hours", body = ReminderFeedResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_reminders(
    reminder_service: web::Data<ReminderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    match reminder_service.upcoming(&user).await {
        Ok(feed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": feed
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn reminder_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reminders").route("", web::get().to(get_reminders)));
}
