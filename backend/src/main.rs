use std::net::SocketAddr;

use donation_tracker_backend::{
    config::DatabaseConfig, create_router, initialize_backend, SERVER_PORT,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading database configuration");
    let config = DatabaseConfig::from_env()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], SERVER_PORT));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server listening on port {}", SERVER_PORT);

    axum::serve(listener, app).await?;

    Ok(())
}
