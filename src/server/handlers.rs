//! HTTP request handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use crate::core::PriceQuote;

#[derive(Debug, Serialize, Deserialize)]
pub struct RateResponse {
    pub rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /convert/:currency - Quote of the base asset in `currency`.
pub async fn convert(
    State(state): State<AppState>,
    Path(currency): Path<String>,
) -> Result<Json<PriceQuote>, ApiError> {
    let currency = currency.to_lowercase();
    debug!(%currency, "convert request");
    let quote = state.conversion.quote(&currency).await?;
    Ok(Json(quote))
}

/// GET /swap/:from/:to - Cross rate of `from` in units of `to`.
pub async fn swap(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<RateResponse>, ApiError> {
    debug!(%from, %to, "swap request");
    let rate = state.swap.rate(&from, &to).await?;
    Ok(Json(RateResponse { rate }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
