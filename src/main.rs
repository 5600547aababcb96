use std::sync::Arc;

use movie_finder::{
    api::{create_router, AppState},
    config::Config,
    controller::SearchController,
    services::{trending::appwrite::AppwriteCollection, AppwriteStore, TmdbProvider},
    telemetry,
};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = Config::from_env()?;

    let movies = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.http_timeout(),
    )?);
    let trending = Arc::new(AppwriteStore::new(
        AppwriteCollection::from(&config),
        config.trending_limit,
        config.http_timeout(),
    )?);

    let controller = SearchController::new(movies, trending, config.debounce());
    controller.mount();

    let app = create_router(AppState::new(controller.clone()));

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    controller.unmount().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
