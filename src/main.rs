//! Roleguard - JWT login gateway
//! Mission: Issue session cookies and gate routes by role

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clap::Parser;
use roleguard::{
    auth::{AuthState, CredentialStore, InMemoryCredentialStore, JwtHandler},
    config::DEFAULT_JWT_SECRET,
    create_router, GatewayConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    let _ = dotenv();
    init_tracing();

    let config = GatewayConfig::parse();

    let credential_store: Arc<dyn CredentialStore> = match &config.credentials {
        Some(path) => Arc::new(
            InMemoryCredentialStore::from_file(path).context("Failed to load credentials")?,
        ),
        None => {
            info!("🔐 Using built-in credential table");
            Arc::new(InMemoryCredentialStore::builtin())
        }
    };

    if config.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("⚠️  Using default JWT secret; set JWT_SECRET outside development");
    }
    warn!("⚠️  Passwords are compared in plaintext");

    let jwt_handler = Arc::new(JwtHandler::new(&config.jwt_secret));
    let app = create_router(AuthState::new(credential_store, jwt_handler));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Starting Server at {}", config.bind);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roleguard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
