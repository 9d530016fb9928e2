use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::{
    api as auth_api, auth_middleware,
    models::{Claims, ADMIN_ROLE},
    policy::{authorize, Access, ANY_ROLE},
    AuthState,
};
use crate::error::ApiError;
use crate::middleware::request_logging;

/// Create the API router
///
/// `/login` is public; `/admin` and `/profile` sit behind the cookie check.
pub fn create_router(state: AuthState) -> Router {
    let protected_routes = Router::new()
        .route("/admin", get(admin))
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/login", post(auth_api::login))
        .merge(protected_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}

// ===== Route Handlers =====

/// Admin area - GET /admin
async fn admin(Extension(claims): Extension<Claims>) -> Result<String, ApiError> {
    require_role(&claims, ADMIN_ROLE)?;
    Ok(format!("Welcome Admin {}!", claims.username))
}

/// Profile page - GET /profile
async fn profile(Extension(claims): Extension<Claims>) -> Result<String, ApiError> {
    require_role(&claims, ANY_ROLE)?;
    Ok(format!("Welcome {}!", claims.username))
}

fn require_role(claims: &Claims, required_role: &str) -> Result<(), ApiError> {
    match authorize(claims, required_role) {
        Access::Allow => Ok(()),
        Access::Deny => {
            info!(
                "Denied {} ({}): requires role {:?}",
                claims.username, claims.role, required_role
            );
            Err(ApiError::Unauthorized("Insufficient permissions"))
        }
    }
}
