//! Authentication Module
//! Mission: Signed session tokens, credential lookup and role checks

pub mod api;
pub mod credential_store;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod policy;

pub use api::AuthState;
pub use credential_store::{CredentialStore, InMemoryCredentialStore};
pub use jwt::{JwtHandler, TokenError};
pub use middleware::auth_middleware;
pub use policy::{authenticate, authorize, Access, AuthError};
