mod api; // HTTP routes for the web client
mod config;
mod handlers;
mod models;
mod services;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use api::{create_router, AppState};
use config::Config;
use handlers::AnalysisHandler;
use services::GeminiService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before the logger reads RUST_LOG
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting NutriSight analysis gateway...");

    let config = Config::from_env()?;

    let gemini = Arc::new(GeminiService::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    ));
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let state = Arc::new(AppState {
        analysis_handler: AnalysisHandler::new(gemini, config.provider_timeout),
        expose_raw_response: config.expose_raw_response,
    });
    let app = create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    log::info!(
        "🌐 Server running on http://{} (provider timeout {:?}, upload cap {} bytes)",
        config.bind_addr,
        config.provider_timeout,
        config.max_upload_bytes
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("🛑 Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
