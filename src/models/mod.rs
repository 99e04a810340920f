pub mod catalog;
pub mod common;
pub mod order;
pub mod reminder;
pub mod user;
pub mod vehicle;

pub use catalog::*;
pub use common::*;
pub use order::*;
pub use reminder::*;
pub use user::*;
pub use vehicle::*;
