//! Lending Library - demo entry point
//!
//! Loads configuration, seeds the catalog and reports what is on the shelves.

use std::fs;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lending_library::{config::AppConfig, models::ResourceKind, Library};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lending_library={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Lending Library v{}", env!("CARGO_PKG_VERSION"));

    let mut library = Library::new(&config.lending);

    if let Some(ref path) = config.catalog.seed_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path))?;
        let records: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not valid JSON", path))?;
        let ids = library.catalog.import_json(records)?;
        tracing::info!("Seeded {} record(s) from {}", ids.len(), path);
    }

    for kind in ResourceKind::ALL {
        for resource in library.catalog.available_of_kind(kind) {
            tracing::info!(
                "Available {}: id={} {:?} x{}",
                kind,
                resource.id().unwrap_or_default(),
                resource.title(),
                resource.quantity()
            );
        }
    }

    let stats = library.statistics();
    tracing::info!(
        "Catalog holds {} resource(s), {} available, {} borrowed",
        stats.total_resources,
        stats.available_resources,
        stats.borrowed_resources
    );

    Ok(())
}
