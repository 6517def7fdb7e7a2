use anyhow::Context;
use axum::http::{header, Method};
use axum::middleware;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use backend::api::state::AppState;
use backend::shared::config;
use backend::shared::data::dataset::DatasetHandle;
use backend::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = config::load_config()?;
    system::tracing::initialize(&loaded.log_dir(), &loaded.config.logging.filter)?;

    match &loaded.source {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("Using default embedded configuration"),
    }

    // The dataset is loaded once, before the listener is bound; a load
    // failure stops the process.
    let handle = DatasetHandle::new(loaded.dataset_path());
    let dataset = handle
        .get_or_load()
        .with_context(|| format!("Failed to load dataset {}", handle.path().display()))?;

    let state = AppState::new(dataset, loaded.config.dashboard.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let mut app = backend::routes::configure_routes(state);
    if let Some(static_dir) = loaded.static_dir() {
        tracing::info!("Serving static files from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }
    let app = app
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let server = &loaded.config.server;
    let listener = TcpListener::bind((server.host.as_str(), server.port))
        .await
        .with_context(|| format!("Cannot listen on {}:{}", server.host, server.port))?;
    tracing::info!(
        "Sales dashboard listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;
    Ok(())
}
