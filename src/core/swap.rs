//! Cross rate between two assets through a common reference currency

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::config::ExchangeConfig;
use super::error::ExchangeError;
use super::price::PriceOracle;
use super::validate::{normalize_identifier, validate_amount};

#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub from_asset: String,
    pub to_asset: String,
    pub amount: f64,
}

impl SwapRequest {
    pub fn new(from_asset: &str, to_asset: &str, amount: f64) -> Result<Self, ExchangeError> {
        Ok(Self {
            from_asset: normalize_identifier("from asset", from_asset)?,
            to_asset: normalize_identifier("to asset", to_asset)?,
            amount: validate_amount(amount)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub rate: f64,
    pub converted_amount: f64,
}

pub struct SwapService {
    oracle: Arc<dyn PriceOracle>,
    reference_currency: String,
}

impl SwapService {
    pub fn new(oracle: Arc<dyn PriceOracle>, config: &ExchangeConfig) -> Self {
        Self {
            oracle,
            reference_currency: config.reference_currency.clone(),
        }
    }

    /// Price of one `from` unit expressed in `to` units.
    #[instrument(name = "SwapRate", skip(self), fields(reference = %self.reference_currency))]
    pub async fn rate(&self, from: &str, to: &str) -> Result<f64, ExchangeError> {
        let from = normalize_identifier("from asset", from)?;
        let to = normalize_identifier("to asset", to)?;
        let currency = self.reference_currency.as_str();

        let ids: Vec<&str> = if from == to {
            vec![from.as_str()]
        } else {
            vec![from.as_str(), to.as_str()]
        };
        let quote = self.oracle.fetch_prices(&ids, &[currency]).await?;

        let from_price = quote.require(&from, currency).inspect_err(|e| {
            warn!(error = %e, "Oracle quote is missing the source asset");
        })?;
        if from == to {
            return Ok(1.0);
        }

        let to_price = quote.require(&to, currency).inspect_err(|e| {
            warn!(error = %e, "Oracle quote is missing the target asset");
        })?;
        if to_price == 0.0 {
            warn!(asset = %to, "Target asset is priced at zero");
            return Err(ExchangeError::DivisionByZero { asset: to });
        }

        let rate = from_price / to_price;
        if !rate.is_finite() {
            warn!(asset = %to, to_price, "Target asset price too small to divide by");
            return Err(ExchangeError::DivisionByZero { asset: to });
        }
        debug!(from_price, to_price, rate, "Derived cross rate");
        Ok(rate)
    }

    #[instrument(name = "Swap", skip(self))]
    pub async fn swap(&self, request: &SwapRequest) -> Result<SwapResult, ExchangeError> {
        let rate = self.rate(&request.from_asset, &request.to_asset).await?;
        Ok(SwapResult {
            rate,
            converted_amount: request.amount * rate,
        })
    }
}
