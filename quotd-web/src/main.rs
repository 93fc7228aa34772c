//! quotd-web - Quote submission and browsing service
//!
//! Serves the JSON API (submit, list, detail) and the embedded web UI.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use quotd_common::config;
use quotd_web::{build_router, AppState};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "quotd-web", about = "Quote submission and browsing service")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "QUOTD_WEB_PORT", default_value_t = config::DEFAULT_WEB_PORT)]
    port: u16,

    /// SQLite database path (defaults to the platform data directory)
    #[arg(long)]
    database: Option<String>,

    /// Base URL of the real-time gateway, embedded into served pages
    #[arg(long)]
    rt_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting quotd-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let db_path = config::resolve_database_path(args.database.as_deref());
    info!("Database path: {}", db_path.display());
    let pool = quotd_common::db::init_database(&db_path).await?;

    let rt_url = config::resolve_rt_url(args.rt_url.as_deref());
    info!("Real-time gateway URL: {}", rt_url);

    let state = AppState::new(pool, rt_url);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("quotd-web listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
