pub mod middleware;
pub mod token;

pub use token::{Claims, JwtKeys, ADMIN_COOKIE};
