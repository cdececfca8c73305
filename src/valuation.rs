// Nearest-match price estimation
use crate::model::{Car, ValuationError};
use serde::{Deserialize, Serialize};

/// Flat percentage applied once to the base price, by fuel category.
const AJUSTES_COMBUSTIBLE: &[(&str, f64)] = &[
    ("diesel", -0.05),
    ("gasolina", 0.03),
    ("eléctrico", 0.05),
    ("híbrido", 0.02),
];

/// Incoming request body. Everything is optional at the wire level so a
/// missing field can be reported as a 400 instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct ValuationRequest {
    pub marca: Option<String>,
    pub modelo: Option<String>,
    #[serde(rename = "año")]
    pub anyo: Option<i64>,
    pub kilometros: Option<i64>,
    pub combustible: Option<String>,
}

/// A validated request: all five fields present, strings non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationQuery {
    pub marca: String,
    pub modelo: String,
    #[serde(rename = "año")]
    pub anyo: i64,
    pub kilometros: i64,
    pub combustible: String,
}

impl ValuationRequest {
    pub fn validate(self) -> Result<ValuationQuery, ValuationError> {
        let marca = self.marca.filter(|s| !s.is_empty());
        let modelo = self.modelo.filter(|s| !s.is_empty());
        let combustible = self.combustible.filter(|s| !s.is_empty());
        match (marca, modelo, self.anyo, self.kilometros, combustible) {
            (Some(marca), Some(modelo), Some(anyo), Some(kilometros), Some(combustible)) => {
                Ok(ValuationQuery {
                    marca,
                    modelo,
                    anyo,
                    kilometros,
                    combustible,
                })
            }
            _ => Err(ValuationError::MissingFields),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Valuation {
    pub tasacion: i64,
    pub detalles: ValuationQuery,
    pub coche_similar: Car,
}

/// Estimates a price for the queried car against the catalog.
///
/// The reference listing is chosen by a single linear scan: the first
/// comparable is always accepted, and a later one takes its place only when it
/// improves both the year difference and the mileage difference at once. This
/// intentionally depends on catalog order rather than being a true
/// nearest-neighbor search.
pub fn estimate(cars: &[Car], query: &ValuationQuery) -> Result<Valuation, ValuationError> {
    let comparables: Vec<&Car> = cars
        .iter()
        .filter(|c| {
            // Unicode-aware comparison: the catalog stores upper-cased names
            // (CITROËN, ŠKODA) that ASCII folding would miss.
            c.marca.to_lowercase() == query.marca.to_lowercase()
                && c.modelo.to_lowercase() == query.modelo.to_lowercase()
                && c.combustible()
                    .is_some_and(|f| f.to_lowercase() == query.combustible.to_lowercase())
        })
        .collect();

    if comparables.is_empty() {
        return Err(ValuationError::NoComparables);
    }

    // Unparseable year/mileage gets a sentinel difference so the listing can
    // never displace the current best, but still seeds the scan when first.
    let mut best: Option<(&Car, i64, i64)> = None;
    for car in comparables {
        let year_diff = car
            .anyo()
            .map(|y| (y - query.anyo).abs())
            .unwrap_or(i64::MAX);
        let km_diff = car
            .kilometros()
            .map(|k| (k - query.kilometros).abs())
            .unwrap_or(i64::MAX);
        match best {
            None => best = Some((car, year_diff, km_diff)),
            Some((_, best_year, best_km)) if year_diff < best_year && km_diff < best_km => {
                best = Some((car, year_diff, km_diff));
            }
            _ => {}
        }
    }

    let (closest, _, km_diff) = best.ok_or(ValuationError::NoClosest)?;
    // A reference listing without a parseable price cannot anchor an estimate.
    let base_price = closest.precio().ok_or(ValuationError::NoClosest)?;

    // 1% of the base price per full 10,000 km of difference, flat.
    let mut price = base_price - (km_diff / 10_000) as f64 * 0.01 * base_price;
    price += fuel_adjustment(&query.combustible) * base_price;
    if price < 0.0 {
        price = 0.0;
    }

    Ok(Valuation {
        tasacion: price.round() as i64,
        detalles: query.clone(),
        coche_similar: closest.clone(),
    })
}

fn fuel_adjustment(combustible: &str) -> f64 {
    let lower = combustible.to_lowercase();
    AJUSTES_COMBUSTIBLE
        .iter()
        .find(|(fuel, _)| *fuel == lower)
        .map(|(_, pct)| *pct)
        .unwrap_or(0.0)
}
