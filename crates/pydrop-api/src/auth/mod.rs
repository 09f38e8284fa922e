//! JWT authentication: claims, token handling, and middleware.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use models::{JwtClaims, UserContext};
