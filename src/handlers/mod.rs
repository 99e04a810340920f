pub mod admin;
pub mod catalog;
pub mod order;
pub mod reminder;
pub mod rental;
pub mod vehicle;

pub use admin::admin_config;
pub use catalog::catalog_config;
pub use order::order_config;
pub use reminder::reminder_config;
pub use rental::rental_config;
pub use vehicle::vehicle_config;
