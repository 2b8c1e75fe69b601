//! Playbook - Application Entry Point
//!
//! This is the main entry point for the Playbook API server.

use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook::{
    bulk_import::HttpMediaProbe,
    config::CONFIG,
    constants::API_BASE_PATH,
    db, handlers,
    middleware::logging_middleware,
    state::AppState,
    storage::MediaStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Playbook server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Media storage and the HTTP client used by bulk imports
    tokio::fs::create_dir_all(&CONFIG.storage.media_root).await?;
    let storage = MediaStorage::new(CONFIG.storage.media_root.clone());
    let probe = HttpMediaProbe::new(&CONFIG.import)?;
    tracing::info!(media_root = %storage.root().display(), "Media storage ready");

    // Create application state
    let state = AppState::new(db_pool, storage, Arc::new(probe), CONFIG.clone());

    // Build the router
    let mut app = Router::new().nest(API_BASE_PATH, handlers::routes(state.clone()));

    // Serve stored media when it is published under a local path
    let media_path = CONFIG.storage.media_url.trim_end_matches('/');
    if media_path.starts_with('/') && media_path.len() > 1 {
        app = app.nest_service(media_path, ServeDir::new(&CONFIG.storage.media_root));
    }

    let app = app
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
