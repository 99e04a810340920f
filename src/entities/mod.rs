pub mod brands;
pub mod order_items;
pub mod orders;
pub mod pricing_types;
pub mod product_brands;
pub mod product_prices;
pub mod products;
pub mod users;

pub use brands as brand_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use pricing_types as pricing_type_entity;
pub use product_brands as product_brand_entity;
pub use product_prices as product_price_entity;
pub use products as product_entity;
pub use users as user_entity;

pub use orders::OrderStatus;
pub use users::UserRole;
