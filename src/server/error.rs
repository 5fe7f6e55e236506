//! Maps exchange failures onto the uniform `{ "error": ... }` envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::core::ExchangeError;

/// Message returned for every upstream failure. The precise kind only goes
/// to the logs.
pub const RATE_FETCH_FAILED: &str = "Failed to fetch exchange rate";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError(pub ExchangeError);

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ExchangeError::InvalidInput(msg) => {
                warn!(kind = self.0.kind(), "Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ExchangeError::OracleUnavailable(_) => {
                error!(kind = self.0.kind(), error = %self.0, "Exchange request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, RATE_FETCH_FAILED.to_string())
            }
            ExchangeError::RateUnavailable { .. } | ExchangeError::DivisionByZero { .. } => {
                warn!(kind = self.0.kind(), error = %self.0, "Exchange request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, RATE_FETCH_FAILED.to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
