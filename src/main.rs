//! Carelog server entrypoint.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use carelog::api::{app_router, ApiContext};
use carelog::{config, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Carelog starting v{}", config::APP_VERSION);

    if let Err(e) = run().await {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(config::app_data_dir())?;
    let conn = db::open_database(&config::database_path())?;
    let app = app_router(ApiContext::new(conn));

    let addr: SocketAddr = config::bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
