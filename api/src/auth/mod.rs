//! Authentication
//!
//! Session tokens and the bearer-token middleware guarding `/v1` routes.

pub mod middleware;
pub mod token;

pub use middleware::{auth_middleware, AuthUser};
pub use token::TokenService;
