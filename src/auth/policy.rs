//! Access Policy
//! Mission: Turn a presented token into claims, then claims into a decision

use crate::auth::{
    credential_store::CredentialStore,
    jwt::{JwtHandler, TokenError},
    models::Claims,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Required role meaning "any authenticated caller".
pub const ANY_ROLE: &str = "";

/// Why a protected request is unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no credential presented")]
    Missing,
    #[error("credential is malformed")]
    Malformed,
    #[error("credential rejected: {0}")]
    Rejected(TokenError),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::Malformed,
            other => AuthError::Rejected(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Why a login attempt produced no token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Validate an optional presented token.
pub fn authenticate(
    jwt: &JwtHandler,
    token: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Claims, AuthError> {
    let token = token.ok_or(AuthError::Missing)?;
    Ok(jwt.validate(token, now)?)
}

/// Exact, case-sensitive single-role match. An empty requirement admits
/// every authenticated caller.
pub fn authorize(claims: &Claims, required_role: &str) -> Access {
    if required_role.is_empty() || claims.role == required_role {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Check credentials against the store and issue a token carrying the
/// stored role.
pub fn login(
    store: &dyn CredentialStore,
    jwt: &JwtHandler,
    username: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<(String, Claims), LoginError> {
    let credential = store
        .lookup(username)
        .filter(|c| c.password_matches(password))
        .ok_or(LoginError::InvalidCredentials)?;

    Ok(jwt.issue(&credential.username, &credential.role, now)?)
}
