use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gadget_provider::{DataProvider, FileDatasetSource};
use gadget_server::{routes, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: GADGET_LISTEN_ADDR, GADGET_DATA_PATH, GADGET_STATIC_DIR");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting gadget catalog server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Dataset path: {}", config.data_path.display());

    // Load the dataset once; falls back to the bundled default
    let provider = DataProvider::new(FileDatasetSource::new(&config.data_path));
    let dataset = provider.fetch_dataset().await;
    tracing::info!(
        "Serving {} gadgets (last updated {})",
        dataset.len(),
        dataset.last_updated
    );

    let state = AppState::new(dataset);

    // Build router
    let app = routes::create_router(state)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive());

    // Start server
    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running at http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
