use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config;
use crate::router::create_router;

pub async fn serve() -> Result<()> {
    trace!("Entering serve function");
    info!("Shelfnotes application starting up");

    let app_config = config::load();
    debug!("Database URL: {}", app_config.database_url);
    debug!("Bind address: {}", app_config.bind_address);

    // Initialize application state
    trace!("Initializing application state");
    let state = match config::initialize_app_state(&app_config.database_url).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    // Build the session layer from the configured secret
    let session_layer = match config::session_layer(&app_config.session_secret) {
        Ok(layer) => layer,
        Err(e) => {
            error!("Failed to build session layer: {}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state, session_layer);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", app_config.bind_address);
    let listener = match TcpListener::bind(&app_config.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", app_config.bind_address);
            listener
        }
        Err(e) => {
            error!(
                "Failed to bind to address {}: {}",
                app_config.bind_address, e
            );
            return Err(e.into());
        }
    };

    info!(
        "Shelfnotes server running on http://{}",
        app_config.bind_address
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
