use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_grid_backend::config::resolve_config;
use todo_grid_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // An unknown ENVIRONMENT aborts startup here
    let config = resolve_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level)),
        )
        .init();

    info!("environment: {}", config.environment);

    let state = initialize_backend(&config).await?;
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
