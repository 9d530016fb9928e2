//! Roleguard Library
//!
//! Exposes the token service, access policy and HTTP router for the
//! binary and for tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;

pub use api::create_router;
pub use config::GatewayConfig;
pub use error::ApiError;
