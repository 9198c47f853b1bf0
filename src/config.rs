//! Configuration parsing and validation for the relay binary
//!
//! Everything is fixed at startup; nothing is re-read while the server runs.
//! The defaults reproduce the intended local setup: port 8000, an Ollama
//! instance on its default port, and the client assets next to the server.
use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The port on which the relay will listen.
    #[arg(short = 'p', long, default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the upstream Ollama API.
    #[arg(short = 'u', long, default_value = "http://localhost:11434/api")]
    pub upstream: Url,

    /// Directory the web client is served from (`/` and `/static`).
    #[arg(short = 's', long, default_value = ".")]
    pub static_dir: PathBuf,

    /// Whether to attach the permissive CORS layer to every response.
    #[arg(long, default_value_t = true)]
    pub cors: bool,
}

impl Config {
    pub fn validate(self) -> Result<Self, anyhow::Error> {
        if !self.static_dir.is_dir() {
            return Err(anyhow!(
                "Static directory '{}' does not exist",
                self.static_dir.display()
            ));
        }
        Ok(self)
    }
}
