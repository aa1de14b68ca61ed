//! HTTP server for the Refund Engine.
//!
//! Reads settings from `REFUND_ENGINE_*` environment variables, loads the
//! refund policies, and serves the API with in-memory stores.

use std::error::Error;

use refund_engine::api::{AppState, create_router};
use refund_engine::config::{ConfigLoader, LogFormat, Settings};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refund_engine=info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    init_logging(settings.log_format);

    let config = ConfigLoader::load(&settings.config_dir)?;
    let router = create_router(AppState::in_memory(config));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "Refund engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
