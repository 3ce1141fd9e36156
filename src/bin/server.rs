//! Stegoscope service binary.

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::sync::Arc;

use stegoscope::config::ServerConfig;
use stegoscope::web::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "stegoscope", about = "LSB steganography decode service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config/server.toml")]
    config: String,

    /// Override the configured bind address (host:port)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match ServerConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("falling back to default configuration: {}", e);
            ServerConfig::default()
        }
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    let addr = config.server.bind_address.clone();
    let state = Arc::new(AppState::new(&config));
    let app = web::router(state);

    info!("🚀 stegoscope listening on http://{}", addr);
    info!("   GET  /health        - liveness check");
    info!("   POST /decode        - recover hidden file (JSON envelope)");
    info!("   POST /decode/direct - recover hidden file (raw bytes)");
    info!("   POST /encode        - embed a payload into a carrier image");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
