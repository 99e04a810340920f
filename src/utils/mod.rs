pub mod billing;
pub mod jwt;

pub use billing::*;
pub use jwt::*;
