//! Authentication API Endpoints
//! Mission: Provide the login endpoint that hands out session cookies

use crate::auth::{
    credential_store::CredentialStore,
    jwt::JwtHandler,
    middleware::TOKEN_COOKIE,
    models::{Claims, LoginRequest},
    policy::{self, LoginError},
};
use crate::error::ApiError;
use axum::{body::Bytes, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub credential_store: Arc<dyn CredentialStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(credential_store: Arc<dyn CredentialStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            credential_store,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /login
///
/// The body is decoded by hand so that any non-JSON payload is a 400
/// regardless of Content-Type.
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<CookieJar, ApiError> {
    let payload: LoginRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected login body: {}", e);
        ApiError::BadRequest("Invalid login request body")
    })?;

    info!("🔐 Login attempt: {}", payload.username);

    let (token, claims) = policy::login(
        state.credential_store.as_ref(),
        &state.jwt_handler,
        &payload.username,
        &payload.password,
        Utc::now(),
    )
    .map_err(|e| {
        if e == LoginError::InvalidCredentials {
            warn!("❌ Failed login attempt: {}", payload.username);
        }
        ApiError::from(e)
    })?;

    let cookie = session_cookie(token, &claims)?;

    info!("✅ Login successful: {} ({})", claims.username, claims.role);

    Ok(jar.add(cookie))
}

/// Session cookie whose `Expires` matches the claims' expiry.
fn session_cookie(token: String, claims: &Claims) -> Result<Cookie<'static>, ApiError> {
    let expires = OffsetDateTime::from_unix_timestamp(claims.exp).map_err(|e| {
        error!("Token expiry {} not representable: {}", claims.exp, e);
        ApiError::InternalError
    })?;

    Ok(Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .expires(expires)
        .build())
}
