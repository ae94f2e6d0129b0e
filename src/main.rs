use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use inkpost::logging::init_tracing;
use inkpost::router::init_router;
use inkpost::state::AppState;
use inkpost_config::{AppConfig, DatabaseConfig};
use inkpost_db::init_db_pool;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize logging")?;

    let config = AppConfig::from_env();
    let database = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&database)
        .await
        .context("Failed to connect to database")?;

    if config.server.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let address = config.server.bind_address();
    let app = init_router(AppState::new(pool, &config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(
        environment = %config.environment,
        address = %address,
        "🚀 Server running; docs at /swagger-ui and /scalar"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
