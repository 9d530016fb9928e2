//! JWT Token Handler
//! Mission: Issue and validate short-lived HS256 session tokens

use crate::auth::models::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use thiserror::Error;
use tracing::debug;

/// Fixed session lifetime. Not configurable.
pub const TOKEN_TTL_MINUTES: i64 = 5;

/// Outcomes of a failed issue or validate call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a header.claims.signature structure, or a segment failed to decode.
    #[error("malformed token")]
    Malformed,
    /// Well-formed, but the signature does not verify against the key.
    #[error("token signature does not verify")]
    BadSignature,
    /// Signature verifies, expiry is not in the future.
    #[error("token expired")]
    Expired,
    /// Signature verifies, some other validity check failed.
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Maps errors from `decode`, which only reaches the payload once the
/// signature has verified. Header decoding failures are classified earlier
/// in `JwtHandler::validate`.
impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidToken => TokenError::Malformed,
            // A header naming another algorithm cannot carry one of our signatures.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err.to_string()),
        }
    }
}

/// JWT Handler for token operations
///
/// Holds the process-wide symmetric key. Shared read-only across requests.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate`, the
        // library still insists the claim is present.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::minutes(TOKEN_TTL_MINUTES),
        }
    }

    /// Sign a token for an authenticated user, expiring `now + 5 minutes`.
    pub fn issue(
        &self,
        username: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Claims), TokenError> {
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;

        let claims = Claims::new(username, role, expiration.timestamp());

        debug!(
            "Issuing JWT for user {} ({}), expires at {}",
            claims.username, claims.role, expiration
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok((token, claims))
    }

    /// Verify the signature and expiry, returning the claims as issued.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        decode_header(token).map_err(|_| TokenError::Malformed)?;

        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = decoded.claims;

        if !claims.is_live_at(now) {
            debug!("Rejected expired JWT for user {}", claims.username);
            return Err(TokenError::Expired);
        }

        debug!("Validated JWT for user {}", claims.username);

        Ok(claims)
    }
}
