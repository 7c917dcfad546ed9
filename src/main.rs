mod clipboard;
mod config;
mod error;
mod handlers;
mod language;
mod presentation;
mod routes;
mod speech;
mod state;
mod translate;
mod websocket;
mod widget;

#[cfg(test)]
mod testing;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, loaded_path) = load_config()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.system_config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No config file found; using defaults and environment"),
    }

    info!(
        "Catalog defaults: {} -> {}",
        config.translator_config.source_default, config.translator_config.target_default
    );

    // Initialize app state
    let app_state = AppState::new(config.clone())?;

    // Build application
    let app = Router::new()
        .merge(routes::create_routes(&app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state.clone());

    // Start server
    let host: std::net::IpAddr = config.system_config.host.parse()?;
    let addr = SocketAddr::from((host, config.system_config.port));
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await?;

    Ok(())
}

/// Load configuration from the first file that exists, or from defaults
/// plus environment overrides when there is none.
fn load_config() -> Result<(Config, Option<String>)> {
    // Get the executable directory to resolve relative paths correctly
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in config_paths {
        if !std::path::Path::new(&path).exists() {
            continue;
        }
        // A file that exists but does not parse is fatal
        let config = Config::load(&path)?;
        return Ok((config, Some(path)));
    }

    Ok((Config::from_env()?, None))
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down");
    state.controller.shutdown();
}
