use anyhow::{ensure, Result};
use sea_orm::Database;
use time::Duration;
use tower_sessions::{cookie::Key, service::SignedCookie, Expiry, MemoryStore, SessionManagerLayer};
use tracing::{info, warn};

use crate::schemas::AppState;

const DEFAULT_DATABASE_URL: &str = "sqlite://shelfnotes.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
// Long enough to pass the length check; never use outside development.
const DEV_SESSION_SECRET: &str = "shelfnotes-dev-session-secret-change-in-production";

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub session_secret: String,
}

/// Load configuration from the environment (with `.env` support).
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
        warn!("SESSION_SECRET not set, falling back to the insecure development secret");
        DEV_SESSION_SECRET.to_string()
    });

    AppConfig {
        database_url,
        bind_address,
        session_secret,
    }
}

/// Initialize application state
pub async fn initialize_app_state(database_url: &str) -> Result<AppState> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;
    Ok(AppState { db })
}

/// Build the session layer: server-side memory store, opaque cookie
/// signed with the configured secret, sliding 30-day expiry.
pub fn session_layer(
    session_secret: &str,
) -> Result<SessionManagerLayer<MemoryStore, SignedCookie>> {
    ensure!(
        session_secret.len() >= 32,
        "SESSION_SECRET must be at least 32 bytes"
    );
    let key = Key::derive_from(session_secret.as_bytes());

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(30)))
        .with_signed(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_session_secret_is_rejected() {
        assert!(session_layer("too short").is_err());
    }

    #[test]
    fn dev_session_secret_is_long_enough() {
        assert!(session_layer(DEV_SESSION_SECRET).is_ok());
    }
}
