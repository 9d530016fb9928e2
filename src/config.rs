//! Gateway configuration
//!
//! Loaded once at process start from flags or environment. The signing key
//! lives for the whole process and is never rotated.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_JWT_SECRET: &str = "secret-key";

#[derive(Parser, Debug, Clone)]
#[command(name = "roleguard")]
#[command(about = "Cookie-based JWT login gateway with role-gated routes")]
pub struct GatewayConfig {
    /// Address to listen on
    #[arg(long, env = "ROLEGUARD_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Symmetric HS256 signing key
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// TOML credentials file; the built-in table is used when absent
    #[arg(long, env = "ROLEGUARD_CREDENTIALS")]
    pub credentials: Option<PathBuf>,
}
