mod auth;
mod config;
mod error;
mod helpers;
mod middleware;
mod models;
mod permissions;
mod routes;
mod schema;
mod services;

use std::sync::Arc;

use chrono::Duration;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::*;

use crate::auth::jwt::JwtKeys;
use crate::middleware::cors::CorsExt;
use crate::middleware::logging::HttpLoggingExt;
use crate::middleware::request_id::RequestIdExt;
use crate::routes::AppState;
use crate::services::DbServices;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::AppCfg::load()?;

    config::tracing::init();

    if cfg.run_migrations {
        services::migrations::run(&cfg.database_url).await?;
    }

    // create a new connection pool with the configured size
    let mgr =
        AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(&cfg.database_url);

    info!("Starting DB pool");
    let pool = Pool::builder(mgr)
        .max_size(cfg.db_pool_size)
        .runtime(deadpool::Runtime::Tokio1)
        .build()?;

    let jwt = Arc::new(JwtKeys::new(
        cfg.jwt_secret.as_bytes(),
        Duration::seconds(cfg.token_ttl_secs),
    ));
    let state = AppState::new(DbServices::new(pool), jwt);

    let app = routes::app(state)
        .with_cors(&cfg.cors_origins)
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_http_logging()
        .with_request_id();

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!("starting listening at {}", cfg.listen_addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(%e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
