use std::env;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};

use crate::{
    db_operations::Database,
    handlers::{cors_layer, router, AppState},
    seed_loader::seed_if_empty,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_file: String,
    pub bind: String,
    pub cors_origins: Vec<String>,
    pub seed: bool,
}

pub fn logger_init(module_path: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module_path,
            if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let db = Database::open(&config.db_file)
        .with_context(|| format!("Could not open database {}", config.db_file))?;
    let state = AppState::new(db);

    // before binding, so no request ever sees a half seeded catalog
    if config.seed {
        seed_if_empty(&state.canteens).context("Loading sample data failed")?;
    }

    let cors = cors_layer(&config.cors_origins).context("Invalid CORS origin")?;
    log::info!("Allowed origins: {}", config.cors_origins.join(", "));

    let app = router(state, cors);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Could not bind to {}", config.bind))?;
    log::info!("Server running on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
