pub mod catalog_service;
pub mod order_service;
pub mod reminder_service;
pub mod rental_service;
pub mod user_service;
pub mod vehicle_service;

pub use catalog_service::*;
pub use order_service::*;
pub use reminder_service::*;
pub use rental_service::*;
pub use user_service::*;
pub use vehicle_service::*;
