//! Converts the base asset into another currency

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::config::ExchangeConfig;
use super::error::ExchangeError;
use super::price::{PriceOracle, PriceQuote};
use super::validate::{normalize_identifier, validate_amount};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub target_currency: String,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(target_currency: &str, amount: f64) -> Result<Self, ExchangeError> {
        Ok(Self {
            target_currency: normalize_identifier("currency", target_currency)?,
            amount: validate_amount(amount)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub currency: String,
    pub unit_price: f64,
}

pub struct ConversionService {
    oracle: Arc<dyn PriceOracle>,
    base_asset: String,
}

impl ConversionService {
    pub fn new(oracle: Arc<dyn PriceOracle>, config: &ExchangeConfig) -> Self {
        Self {
            oracle,
            base_asset: config.base_asset.clone(),
        }
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    /// Raw quote of the base asset in `currency`, checked for presence.
    #[instrument(name = "ConversionQuote", skip(self), fields(base = %self.base_asset))]
    pub async fn quote(&self, currency: &str) -> Result<PriceQuote, ExchangeError> {
        let currency = normalize_identifier("currency", currency)?;
        let quote = self
            .oracle
            .fetch_prices(&[self.base_asset.as_str()], &[currency.as_str()])
            .await?;

        if let Err(e) = quote.require(&self.base_asset, &currency) {
            warn!(error = %e, "Oracle quote is missing the requested pair");
            return Err(e);
        }
        Ok(quote.only(&self.base_asset))
    }

    #[instrument(name = "Convert", skip(self), fields(base = %self.base_asset))]
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ExchangeError> {
        let quote = self.quote(&request.target_currency).await?;
        let unit_price = quote.require(&self.base_asset, &request.target_currency)?;
        let value = unit_price * request.amount;
        debug!(unit_price, value, "Converted amount");

        Ok(ConversionResult {
            value,
            currency: request.target_currency.clone(),
            unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::StubOracle;

    fn service(oracle: StubOracle) -> ConversionService {
        ConversionService::new(Arc::new(oracle), &ExchangeConfig::default())
    }

    #[tokio::test]
    async fn test_convert_multiplies_price_by_amount() {
        let oracle = StubOracle::with_json(r#"{"pi-network":{"usd":0.5}}"#);
        let request = ConversionRequest::new("usd", 10.0).unwrap();

        let result = service(oracle).convert(&request).await.unwrap();
        assert_eq!(result.value, 5.0);
        assert_eq!(result.currency, "usd");
        assert_eq!(result.unit_price, 0.5);
    }

    #[tokio::test]
    async fn test_convert_forwards_base_asset_and_currency() {
        let oracle = StubOracle::with_json(r#"{"pi-network":{"eur":0.4}}"#);
        let calls = oracle.calls();
        let request = ConversionRequest::new("EUR", 3.0).unwrap();

        service(oracle).convert(&request).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, vec!["pi-network".to_string()]);
        assert_eq!(calls[0].1, vec!["eur".to_string()]);
    }

    #[tokio::test]
    async fn test_convert_unknown_currency_is_rate_unavailable() {
        let oracle = StubOracle::with_json(r#"{"pi-network":{}}"#);
        let request = ConversionRequest::new("xyz", 10.0).unwrap();

        let result = service(oracle).convert(&request).await;
        assert_eq!(
            result,
            Err(ExchangeError::rate_unavailable("pi-network", "xyz"))
        );
    }

    #[tokio::test]
    async fn test_convert_missing_base_asset_is_rate_unavailable() {
        let oracle = StubOracle::with_json(r#"{}"#);
        let request = ConversionRequest::new("usd", 1.0).unwrap();

        let result = service(oracle).convert(&request).await;
        assert!(matches!(result, Err(ExchangeError::RateUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_convert_propagates_oracle_failure() {
        let oracle = StubOracle::failing("connection refused");
        let request = ConversionRequest::new("usd", 1.0).unwrap();

        let result = service(oracle).convert(&request).await;
        assert_eq!(
            result,
            Err(ExchangeError::OracleUnavailable(
                "connection refused".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_quote_drops_unrequested_assets() {
        let oracle =
            StubOracle::with_json(r#"{"pi-network":{"usd":0.5},"bitcoin":{"usd":50000}}"#);

        let quote = service(oracle).quote("USD").await.unwrap();
        assert_eq!(quote.price("pi-network", "usd"), Some(0.5));
        assert!(!quote.contains_asset("bitcoin"));
    }

    #[test]
    fn test_request_rejects_negative_amount() {
        assert!(matches!(
            ConversionRequest::new("usd", -2.0),
            Err(ExchangeError::InvalidInput(_))
        ));
    }
}
