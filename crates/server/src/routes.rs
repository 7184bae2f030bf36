//! HTTP routes.
//!
//! - `GET /`             static greeting
//! - `GET /predict_crop`  hint that predictions need POST
//! - `POST /predict_crop` `{"district": "..."}` -> ranked crops

use crate::error::ApiError;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use engine::CropPrediction;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub const GREETING: &str = "Hello, this is the Crop Prediction API.";
pub const PREDICT_GET_HINT: &str =
    "This endpoint also supports GET, but you must POST to get predictions.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub district: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<CropPrediction>,
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict_crop", get(predict_crop_hint).post(predict_crop))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn home() -> &'static str {
    GREETING
}

async fn predict_crop_hint() -> &'static str {
    PREDICT_GET_HINT
}

#[tracing::instrument(name = "POST /predict_crop", skip(state, body))]
async fn predict_crop(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let district = extract_district(&body)?;
    debug!("Predicting top {} crops for '{}'", state.top_n, district);

    let predictions = state.context.recommend(&district, state.top_n)?;
    Ok(Json(PredictResponse { predictions }))
}

/// Pull the district name out of a raw request body.
///
/// Anything that is not a JSON object with a string `district` counts as a
/// missing field.
fn extract_district(body: &[u8]) -> Result<String, ApiError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::MissingRequestField)?;
    value
        .as_object()
        .and_then(|object| object.get("district"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::MissingRequestField)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_district() {
        assert_eq!(extract_district(br#"{"district": "Pune"}"#).unwrap(), "Pune");
        assert_eq!(extract_district(br#"{"district": ""}"#).unwrap(), "");
    }

    #[test]
    fn test_extract_district_missing() {
        let bodies: [&[u8]; 7] = [
            b"",
            b"{}",
            b"[]",
            br#"["Pune"]"#,
            b"not json",
            br#"{"district": null}"#,
            br#"{"district": 7}"#,
        ];
        for body in bodies {
            assert!(matches!(extract_district(body), Err(ApiError::MissingRequestField)));
        }
    }
}
