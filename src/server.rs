// HTTP surface: lookup endpoints plus the valuation endpoint
use crate::config::AppConfig;
use crate::model::{Car, ValuationError};
use crate::valuation::{Valuation, ValuationRequest};
use crate::{catalog, valuation};
use axum::{
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

impl IntoResponse for ValuationError {
    fn into_response(self) -> Response {
        let status = match self {
            ValuationError::MissingFields => StatusCode::BAD_REQUEST,
            ValuationError::NoComparables | ValuationError::NoClosest => StatusCode::NOT_FOUND,
        };
        error_response(status, self.to_string())
    }
}

pub fn router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/api/coches", get(get_coches))
        .route("/api/marcas", get(get_marcas))
        .route("/api/modelos/{marca}", get(get_modelos))
        .route("/api/versiones/{marca}/{modelo}", get(get_versiones))
        .route("/api/tasacion", post(post_tasacion))
        .with_state(config)
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(config: Arc<AppConfig>) -> std::io::Result<()> {
    let app = router(config.clone());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Servidor corriendo en http://localhost:{}", config.port);
    axum::serve(listener, app).await
}

/// Re-reads the artifact on every request so responses always reflect the
/// latest normalizer run.
fn load(config: &AppConfig) -> Result<Vec<Car>, Response> {
    catalog::load_cars(&config.processed_path).map_err(|e| {
        error!("Error al cargar el catálogo: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

async fn get_coches(State(config): State<Arc<AppConfig>>) -> Result<Json<Vec<Car>>, Response> {
    let cars = load(&config)?;
    Ok(Json(cars))
}

async fn get_marcas(State(config): State<Arc<AppConfig>>) -> Result<Json<Vec<String>>, Response> {
    let cars = load(&config)?;
    Ok(Json(catalog::distinct_marcas(&cars)))
}

async fn get_modelos(
    State(config): State<Arc<AppConfig>>,
    Path(marca): Path<String>,
) -> Result<Json<Vec<String>>, Response> {
    let cars = load(&config)?;
    Ok(Json(catalog::distinct_modelos(&cars, &marca)))
}

async fn get_versiones(
    State(config): State<Arc<AppConfig>>,
    Path((marca, modelo)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, Response> {
    let cars = load(&config)?;
    Ok(Json(catalog::distinct_versiones(&cars, &marca, &modelo)))
}

async fn post_tasacion(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<ValuationRequest>,
) -> Result<Json<Valuation>, Response> {
    // Validation happens before the catalog is even read.
    let query = request.validate().map_err(|e| e.into_response())?;
    let cars = load(&config)?;
    let valuation = valuation::estimate(&cars, &query).map_err(|e| e.into_response())?;
    Ok(Json(valuation))
}
