// Core structs: Car, error enums
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A catalog listing. Raw input only carries `name` plus arbitrary attributes;
/// the normalizer fills in `marca`, `modelo` and `version`. One struct covers
/// both shapes so the artifact round-trips without losing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub name: String,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub version: String,
    /// Every other attribute (precio, kilometros, año, combustible, ...)
    /// carried through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Car {
    /// Registration year, accepting either a JSON number or a numeric string.
    pub fn anyo(&self) -> Option<i64> {
        match self.extra.get("año")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Mileage, stripping display noise from strings ("50.000 km" -> 50000).
    pub fn kilometros(&self) -> Option<i64> {
        match self.extra.get("kilometros")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => {
                let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
                digits.parse::<i64>().ok()
            }
            _ => None,
        }
    }

    /// Listed price. Display strings keep only digits and commas, with the
    /// comma as decimal separator ("12.000€" -> 12000.0).
    pub fn precio(&self) -> Option<f64> {
        match self.extra.get("precio")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == ',')
                    .collect();
                cleaned.replace(',', ".").parse::<f64>().ok()
            }
            _ => None,
        }
    }

    pub fn combustible(&self) -> Option<&str> {
        self.extra.get("combustible").and_then(Value::as_str)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no se pudo leer {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON inválido en {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("no se pudo serializar el catálogo para {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
    #[error("no se pudo escribir {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Faltan datos para la tasación.")]
    MissingFields,
    #[error("No se encontraron coches similares para tasar.")]
    NoComparables,
    #[error("No se pudo encontrar un coche similar para tasar.")]
    NoClosest,
}
