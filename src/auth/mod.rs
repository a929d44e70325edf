//! Authentication Module
//! Mission: Username login with stateless JWT bearer tokens

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::Identity;
