//! Error taxonomy shared by the oracle client and the exchange services

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    /// The upstream oracle could not be reached, timed out, answered with a
    /// non-success status or returned a body we could not parse.
    #[error("Price oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The oracle answered, but the requested pair was not in the quote.
    #[error("Rate unavailable for {asset} in {currency}")]
    RateUnavailable { asset: String, currency: String },

    #[error("Cannot derive a rate against {asset}: its price is zero")]
    DivisionByZero { asset: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ExchangeError {
    pub fn rate_unavailable(asset: &str, currency: &str) -> Self {
        ExchangeError::RateUnavailable {
            asset: asset.to_string(),
            currency: currency.to_string(),
        }
    }

    /// Short machine-readable name of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::OracleUnavailable(_) => "oracle_unavailable",
            ExchangeError::RateUnavailable { .. } => "rate_unavailable",
            ExchangeError::DivisionByZero { .. } => "division_by_zero",
            ExchangeError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::OracleUnavailable(format!("request timed out: {err}"))
        } else {
            ExchangeError::OracleUnavailable(err.to_string())
        }
    }
}
