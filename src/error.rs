//! HTTP boundary errors
//! Mission: Collapse every failure into one terminal status per request

use crate::auth::{
    jwt::TokenError,
    policy::{AuthError, LoginError},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Request-level error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Unparsable login body or malformed token.
    BadRequest(&'static str),
    /// Missing credential, bad credentials, rejected token or insufficient role.
    Unauthorized(&'static str),
    /// Signing failure during issuance.
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Missing => ApiError::Unauthorized("Missing authorization token"),
            AuthError::Malformed => ApiError::BadRequest("Malformed authorization token"),
            AuthError::Rejected(TokenError::BadSignature) => {
                ApiError::Unauthorized("Invalid token signature")
            }
            AuthError::Rejected(TokenError::Expired) => ApiError::Unauthorized("Token has expired"),
            AuthError::Rejected(_) => ApiError::Unauthorized("Invalid or expired token"),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password")
            }
            LoginError::Token(e) => {
                error!("Token issuance failed: {}", e);
                ApiError::InternalError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) => msg,
            ApiError::InternalError => "Internal server error",
        };

        (status, message).into_response()
    }
}
