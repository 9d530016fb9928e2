//! Authentication Models
//! Mission: Define the credential, login and claims data structures

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Role tag required by the admin area.
pub const ADMIN_ROLE: &str = "admin";

/// Credential record owned by a credential store.
///
/// The password is kept and compared in plaintext. A production store would
/// hold a salted hash instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
}

impl Credential {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
        }
    }

    /// Exact, case-sensitive plaintext comparison.
    pub fn password_matches(&self, submitted: &str) -> bool {
        self.password == submitted
    }
}

/// JWT Claims payload
///
/// Built once per issue or parse call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: String,
    pub exp: i64, // expiration, unix seconds
}

impl Claims {
    pub fn new(username: impl Into<String>, role: impl Into<String>, exp: i64) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            exp,
        }
    }

    /// Absolute expiry as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// True while `now` is strictly before the expiry.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.exp > now.timestamp()
    }
}

/// Login request body
///
/// Missing fields decode as empty strings so they fail the credential check
/// rather than the JSON parse.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
