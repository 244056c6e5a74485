use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gadget_cli::{commands, logging, Cli, Config};
use gadget_core::{CatalogSession, FavoritesStore};
use gadget_provider::{bundled_default, DataProvider, SourceLocation};
use gadget_store::ClientStorage;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the catalog output
    tracing_subscriber::registry()
        .with(logging::env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::resolve(cli.source.clone(), cli.storage.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: GADGET_SOURCE, GADGET_STORAGE_PATH");
            std::process::exit(1);
        }
    };

    let dataset = match &config.source {
        Some(location) => {
            DataProvider::new(SourceLocation::parse(location))
                .fetch_dataset()
                .await
        }
        None => {
            tracing::info!("No dataset source configured, using bundled data");
            bundled_default()
        }
    };

    // Falls back to memory when the database cannot be opened
    let favorites = FavoritesStore::new(ClientStorage::open(&config.storage_path));
    let mut session = CatalogSession::new(dataset, favorites);

    match commands::run(&mut session, &cli.command) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
