use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_cars_path")]
    pub cars_path: String,
    #[serde(default = "default_processed_path")]
    pub processed_path: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_cars_path() -> String {
    "cars.json".to_string()
}

fn default_processed_path() -> String {
    "processedCars.json".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cars_path: default_cars_path(),
            processed_path: default_processed_path(),
            port: default_port(),
        }
    }
}

/// Loads the config file. A missing file falls back to defaults; a present
/// but malformed file is an error.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
