pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod web;

use error::AppError;
use infra::{Settings, StoreHandle, StoreLocation};

/// Serve the intake form and reports endpoints until the listener fails.
///
/// The store is not opened here; the first request connects it.
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let location = StoreLocation::resolve(settings.database_url.as_deref(), settings.production);
    let store = StoreHandle::new(location);
    log::info!("Database URL: {}", store.location());

    let app = web::router(web::AppState::new(store));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .map_err(|e| AppError::Config(format!("bind {}: {}", settings.bind_addr, e)))?;
    log::info!("Listening on http://{}", settings.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Unexpected(format!("http server error: {}", e)))
}
