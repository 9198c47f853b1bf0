mod config;

use clap::Parser as _;
use config::Config;
use ollama_relay::{AppState, build_router, permissive_cors};
use tokio::net::TcpListener;
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
pub async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse().validate()?;
    info!("Starting Ollama relay with config: {:?}", config);

    let app_state = AppState::new(config.upstream, config.static_dir);
    let mut router = build_router(app_state);
    if config.cors {
        router = router.layer(permissive_cors());
    }

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Ollama relay listening on {}", bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
