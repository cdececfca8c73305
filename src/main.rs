mod catalog;
mod config;
mod model;
mod normalizer;
mod server;
mod valuation;

use config::{AppConfig, load_config};
use normalizer::normalize_all;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file (defaults apply when absent)
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    match std::env::args().nth(1).as_deref() {
        Some("normalize") => run_normalizer(&config),
        None | Some("serve") => {
            if let Err(e) = server::serve(config).await {
                error!("Server error: {}", e);
            }
        }
        Some(other) => {
            error!("Unknown mode: {} (expected \"normalize\" or \"serve\")", other);
        }
    }
}

/// Runs the batch normalizer: reads the raw catalog, derives
/// marca/modelo/version for every listing and overwrites the processed
/// artifact in full. Any failure aborts the run without partial output.
fn run_normalizer(config: &AppConfig) {
    info!("Procesando {}...", config.cars_path);
    let mut cars = match catalog::load_cars(&config.cars_path) {
        Ok(cars) => cars,
        Err(e) => {
            error!("Error al procesar el archivo JSON: {}", e);
            return;
        }
    };

    normalize_all(&mut cars);

    if let Err(e) = catalog::write_cars(&config.processed_path, &cars) {
        error!("Error al guardar el archivo: {}", e);
        return;
    }
    info!(
        "Archivo procesado guardado como: {} ({} coches)",
        config.processed_path,
        cars.len()
    );
}
