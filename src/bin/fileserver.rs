//! Standalone static file server.
//!
//! A fallback for serving the web client without the relay: plain file
//! serving from a directory plus the same permissive CORS layer. Shares no
//! state with the relay binary; runs until killed.
use axum::Router;
use clap::Parser;
use ollama_relay::permissive_cors;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
struct Config {
    /// The port on which the file server will listen.
    #[arg(short = 'p', long, default_value_t = 8000)]
    port: u16,

    /// Directory to serve.
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // ServeDir appends index.html for directory requests and 404s on missing
    // files, which is all the "file server semantics" this program needs.
    let router = Router::new()
        .fallback_service(ServeDir::new(&config.dir))
        .layer(permissive_cors());

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Serving {} on {}", config.dir.display(), bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
