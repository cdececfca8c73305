// Flat-file catalog: the JSON artifact is the only data source
use crate::model::{Car, CatalogError};
use std::collections::HashSet;
use std::fs;

/// Reads a catalog file (raw or processed, same shape) into memory.
pub fn load_cars(path: &str) -> Result<Vec<Car>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_string(),
        source: e,
    })
}

/// Overwrites the processed artifact in full. No partial output: serialization
/// happens before the file is touched.
pub fn write_cars(path: &str, cars: &[Car]) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(cars).map_err(|e| CatalogError::Serialize {
        path: path.to_string(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| CatalogError::Write {
        path: path.to_string(),
        source: e,
    })
}

/// Distinct brand values, first-seen order.
pub fn distinct_marcas(cars: &[Car]) -> Vec<String> {
    distinct(cars.iter().map(|c| c.marca.as_str()))
}

/// Distinct models for an exact brand match.
pub fn distinct_modelos(cars: &[Car], marca: &str) -> Vec<String> {
    distinct(
        cars.iter()
            .filter(|c| c.marca == marca)
            .map(|c| c.modelo.as_str()),
    )
}

/// Distinct versions for an exact brand + model match.
pub fn distinct_versiones(cars: &[Car], marca: &str, modelo: &str) -> Vec<String> {
    distinct(
        cars.iter()
            .filter(|c| c.marca == marca && c.modelo == modelo)
            .map(|c| c.version.as_str()),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        if seen.insert(value) {
            result.push(value.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cars() -> Vec<Car> {
        serde_json::from_value(json!([
            { "name": "SEAT LEON TDI", "marca": "SEAT", "modelo": "LEON", "version": "TDI" },
            { "name": "SEAT LEON FR", "marca": "SEAT", "modelo": "LEON", "version": "FR" },
            { "name": "SEAT LEON TDI", "marca": "SEAT", "modelo": "LEON", "version": "TDI" },
            { "name": "SEAT IBIZA", "marca": "SEAT", "modelo": "IBIZA", "version": "" },
            { "name": "OPEL CORSA", "marca": "OPEL", "modelo": "CORSA", "version": "" }
        ]))
        .unwrap()
    }

    #[test]
    fn marcas_are_deduplicated_in_first_seen_order() {
        assert_eq!(distinct_marcas(&sample_cars()), vec!["SEAT", "OPEL"]);
    }

    #[test]
    fn modelos_filter_by_exact_brand() {
        assert_eq!(distinct_modelos(&sample_cars(), "SEAT"), vec!["LEON", "IBIZA"]);
        // Case-sensitive match, no error on zero matches.
        assert!(distinct_modelos(&sample_cars(), "seat").is_empty());
        assert!(distinct_modelos(&sample_cars(), "AUDI").is_empty());
    }

    #[test]
    fn versiones_filter_by_brand_and_model() {
        assert_eq!(
            distinct_versiones(&sample_cars(), "SEAT", "LEON"),
            vec!["TDI", "FR"]
        );
        assert!(distinct_versiones(&sample_cars(), "SEAT", "AROSA").is_empty());
    }

    #[test]
    fn artifact_round_trips_with_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processedCars.json");
        let path = path.to_str().unwrap();

        let cars: Vec<Car> = serde_json::from_value(json!([
            {
                "name": "SEAT LEON TDI",
                "marca": "SEAT",
                "modelo": "LEON",
                "version": "TDI",
                "precio": "12.000€",
                "combustible": "diesel"
            }
        ]))
        .unwrap();

        write_cars(path, &cars).unwrap();
        let loaded = load_cars(path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].marca, "SEAT");
        assert_eq!(loaded[0].precio(), Some(12000.0));
        assert_eq!(loaded[0].combustible(), Some("diesel"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        match load_cars("no-such-file.json") {
            Err(CatalogError::Read { path, .. }) => assert_eq!(path, "no-such-file.json"),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        match load_cars(path.to_str().unwrap()) {
            Err(CatalogError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
