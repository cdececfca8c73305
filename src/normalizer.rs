// Derives marca/modelo/version from the free-text listing name
use crate::model::Car;

/// Known multi-word brands, checked in order as prefixes of the
/// canonicalized name.
const MARCAS_COMPUESTAS: &[&str] = &[
    "ALFA ROMEO",
    "ASTON MARTIN",
    "LAND ROVER",
    "ROLLS ROYCE",
    "MERCEDES BENZ",
];

/// Spelling variants collapsed into one canonical brand form. Applied after
/// upper-casing, so variants are listed upper-case.
const REESCRITURAS_MARCA: &[(&str, &str)] = &[
    ("MERCEDES-BENZ", "MERCEDES BENZ"),
    ("MERCEDES_BENZ", "MERCEDES BENZ"),
];

/// Canonical display spellings for recognized version tokens, keyed by their
/// upper-cased alias.
const VERSIONES_ESTANDAR: &[(&str, &str)] = &[
    ("200", "200"),
    ("180", "180"),
    ("PURETECH", "PureTech"),
    ("BLUEDCI", "BlueDCI"),
    ("TDI", "TDI"),
    ("ECOBOOST", "EcoBoost"),
    ("STSP", "Start&Stop"),
];

pub fn normalize_all(cars: &mut [Car]) {
    for car in cars.iter_mut() {
        normalize_car(car);
    }
}

fn normalize_car(car: &mut Car) {
    let name = canonicalize_name(&car.name);

    if let Some(marca) = MARCAS_COMPUESTAS.iter().find(|m| name.starts_with(**m)) {
        let mut rest = name[marca.len()..].trim().split_whitespace();
        car.marca = (*marca).to_string();
        car.modelo = rest.next().unwrap_or("").to_string();
        car.version = canonicalize_version(&rest.collect::<Vec<_>>().join(" "));
        return;
    }

    let mut parts = name.split_whitespace();
    car.marca = parts.next().unwrap_or("").to_string();
    car.modelo = parts.next().unwrap_or("").to_string();
    car.version = canonicalize_version(&parts.collect::<Vec<_>>().join(" "));
}

/// Upper-cases the name and collapses known brand spelling variants.
fn canonicalize_name(name: &str) -> String {
    let mut normalized = name.to_uppercase();
    for (variant, canonical) in REESCRITURAS_MARCA {
        normalized = normalized.replace(variant, canonical);
    }
    normalized
}

/// Replaces each version token with its canonical display spelling when
/// recognized, leaving the rest upper-cased. Canonical spellings match
/// themselves case-insensitively, so running this twice is a no-op.
pub fn canonicalize_version(version: &str) -> String {
    version
        .split_whitespace()
        .map(|token| {
            let upper = token.to_uppercase();
            VERSIONES_ESTANDAR
                .iter()
                .find(|(alias, canonical)| *alias == upper || canonical.to_uppercase() == upper)
                .map(|(_, canonical)| (*canonical).to_string())
                .unwrap_or(upper)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Car;

    fn car(name: &str) -> Car {
        Car {
            name: name.to_string(),
            marca: String::new(),
            modelo: String::new(),
            version: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    fn normalized(name: &str) -> Car {
        let mut c = car(name);
        normalize_car(&mut c);
        c
    }

    #[test]
    fn hyphenated_composite_brand() {
        let c = normalized("MERCEDES-BENZ C220 BLUEDCI");
        assert_eq!(c.marca, "MERCEDES BENZ");
        assert_eq!(c.modelo, "C220");
        assert_eq!(c.version, "BlueDCI");
    }

    #[test]
    fn composite_brand_is_case_insensitive() {
        let c = normalized("land rover Discovery tdi");
        assert_eq!(c.marca, "LAND ROVER");
        assert_eq!(c.modelo, "DISCOVERY");
        assert_eq!(c.version, "TDI");
    }

    #[test]
    fn plain_brand_splits_on_whitespace() {
        let c = normalized("Peugeot 208 PureTech 100");
        assert_eq!(c.marca, "PEUGEOT");
        assert_eq!(c.modelo, "208");
        assert_eq!(c.version, "PureTech 100");
    }

    #[test]
    fn unrecognized_version_tokens_stay_uppercased() {
        let c = normalized("Ford Fiesta ecoboost titanium");
        assert_eq!(c.version, "EcoBoost TITANIUM");
    }

    #[test]
    fn stsp_alias_expands() {
        let c = normalized("SEAT IBIZA 1.0 STSP");
        assert_eq!(c.version, "1.0 Start&Stop");
    }

    #[test]
    fn missing_tokens_become_empty_strings() {
        let c = normalized("TESLA");
        assert_eq!(c.marca, "TESLA");
        assert_eq!(c.modelo, "");
        assert_eq!(c.version, "");

        let c = normalized("ALFA ROMEO");
        assert_eq!(c.marca, "ALFA ROMEO");
        assert_eq!(c.modelo, "");
        assert_eq!(c.version, "");
    }

    #[test]
    fn version_canonicalization_is_idempotent() {
        for raw in ["BLUEDCI 180 stsp", "PureTech 130 EAT8", "tdi ECOBOOST"] {
            let once = canonicalize_version(raw);
            assert_eq!(canonicalize_version(&once), once);
        }
    }

    #[test]
    fn normalize_all_preserves_order_and_length() {
        let mut cars = vec![car("SEAT LEON TDI"), car("ASTON MARTIN DB11 V8")];
        normalize_all(&mut cars);
        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0].marca, "SEAT");
        assert_eq!(cars[1].marca, "ASTON MARTIN");
        assert_eq!(cars[1].modelo, "DB11");
    }
}
