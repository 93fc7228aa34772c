//! quotd-rt - Real-time rating gateway
//!
//! Accepts rating updates from the scorer pipeline over HTTP and fans them
//! out to per-quote SSE subscribers.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use quotd_common::config;
use quotd_rt::{build_router, AppState};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "quotd-rt", about = "Real-time rating gateway")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "QUOTD_RT_PORT", default_value_t = config::DEFAULT_RT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting quotd-rt v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let state = AppState::new();
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("quotd-rt listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
