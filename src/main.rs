//! Server entry point: load config, build the lazy pool, bootstrap tables, serve.

use garden_api::store::{connect_lazy, ensure_database_exists, ensure_tables};
use garden_api::{app_router, AppState, Config, PgStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("garden_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = connect_lazy(&config.database)?;

    // Runs beside the listener: a database that is down at startup is logged, not fatal,
    // and requests fail individually until it comes back.
    let bootstrap_config = config.clone();
    let bootstrap_pool = pool.clone();
    tokio::spawn(async move {
        match bootstrap(&bootstrap_config, &bootstrap_pool).await {
            Ok(()) => tracing::info!("database connection successful"),
            Err(e) => tracing::warn!(error = %e, "database unavailable at startup"),
        }
    });

    let state = AppState::new(Arc::new(PgStore::new(pool))).with_cookie_secure(config.cookie_secure);
    let app = app_router(state, &config);

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn bootstrap(config: &Config, pool: &sqlx::PgPool) -> Result<(), garden_api::AppError> {
    let opts = config.database.connect_options()?;
    if let Err(e) = ensure_database_exists(&opts, config.database.acquire_timeout).await {
        tracing::debug!(error = %e, "could not ensure database exists");
    }
    ensure_tables(pool).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
