//! Authentication Middleware
//! Mission: Protect routes by validating the `token` cookie

use crate::auth::{api::AuthState, policy};
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::debug;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Auth middleware that validates the session cookie
///
/// On success the claims are placed in request extensions for handlers.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar.get(TOKEN_COOKIE).map(|c| c.value());

    let claims = policy::authenticate(&state.jwt_handler, token, Utc::now()).map_err(|e| {
        debug!("Rejected request to {}: {}", req.uri().path(), e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
