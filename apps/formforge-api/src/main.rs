//! FormForge API Server - backend for the form editor
//!
//! Provides REST endpoints for:
//! - PDF upload and page inspection
//! - Building a fillable PDF from a layout
//! - Adding fillable fields to an uploaded PDF
//! - Saving layouts

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod upload;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present, before flags read the environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    let level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("formforge_api={}", level).parse()?)
                .add_directive(format!("formforge_core={}", level).parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let addr = config.socket_addr()?;
    let upload_dir = config.upload_dir();
    tokio::fs::create_dir_all(&upload_dir).await?;

    info!("Initializing FormForge API...");
    info!("Uploads stored in {}", upload_dir.display());
    info!(
        "Default page size: {}x{}",
        config.default_page_width, config.default_page_height
    );
    info!("Duplicate field names: {}", config.duplicate_names);

    let state = Arc::new(AppState::new(config));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("FormForge API listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
