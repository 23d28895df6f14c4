// src/main.rs

use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sentimail::config::RelayConfig;
use sentimail::llm::GroqClient;
use sentimail::server::build_router;
use sentimail::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::from_env()?;

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Sentimail relay");
    info!("Model: {}", config.model);

    let llm = Arc::new(GroqClient::new(&config));
    let state = Arc::new(AppState::new(llm));
    let app = build_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
