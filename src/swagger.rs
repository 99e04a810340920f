use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{OrderStatus, UserRole};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::vehicle::list_vehicles,
        handlers::vehicle::create_vehicle,
        handlers::vehicle::update_vehicle,
        handlers::vehicle::delete_vehicle,
        handlers::catalog::list_brands,
        handlers::catalog::create_brand,
        handlers::catalog::list_pricing_types,
        handlers::order::create_order,
        handlers::order::get_orders,
        handlers::rental::my_rentals,
        handlers::reminder::get_reminders,
        handlers::admin::pending_rentals,
        handlers::admin::active_rentals,
        handlers::admin::rental_history,
        handlers::admin::accept_rental,
        handlers::admin::activate_rental,
        handlers::admin::cancel_rental,
        handlers::admin::list_users,
    ),
    components(
        schemas(
            OrderStatus,
            UserRole,
            ReminderType,
            VehicleResponse,
            VehiclePriceEntry,
            CreateVehicleRequest,
            UpdateVehicleRequest,
            DeletedVehicleResponse,
            BrandResponse,
            CreateBrandRequest,
            PricingTypeResponse,
            OrderItemRequest,
            CreateOrderRequest,
            OrderItemResponse,
            OrderResponse,
            RenterSummary,
            RentalResponse,
            ReminderResponse,
            ReminderFeedResponse,
            UserResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "vehicle", description = "Vehicle inventory API"),
        (name = "catalog", description = "Brand and pricing tier API"),
        (name = "order", description = "Checkout and order API"),
        (name = "rental", description = "Customer rental API"),
        (name = "reminder", description = "Upcoming rental reminder API"),
        (name = "admin", description = "Rental administration API"),
    ),
    info(
        title = "ToRent Backend API",
        version = "1.0.0",
        description = "Car rental booking REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
