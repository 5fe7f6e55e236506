//! Pricing abstractions and core types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::ExchangeError;

/// Prices keyed by asset id, then by lowercase currency code.
///
/// Assets the oracle does not recognise are simply absent, so lookups go
/// through [`PriceQuote::price`] rather than indexing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceQuote(HashMap<String, HashMap<String, f64>>);

impl PriceQuote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: &str, currency: &str, price: f64) {
        self.0
            .entry(asset.to_string())
            .or_default()
            .insert(currency.to_string(), price);
    }

    pub fn contains_asset(&self, asset: &str) -> bool {
        self.0.contains_key(asset)
    }

    pub fn price(&self, asset: &str, currency: &str) -> Option<f64> {
        self.0.get(asset).and_then(|prices| prices.get(currency)).copied()
    }

    /// Like [`PriceQuote::price`] but maps absence to `RateUnavailable`.
    pub fn require(&self, asset: &str, currency: &str) -> Result<f64, ExchangeError> {
        self.price(asset, currency)
            .ok_or_else(|| ExchangeError::rate_unavailable(asset, currency))
    }

    /// Narrows the quote to a single asset, keeping all of its currencies.
    pub fn only(&self, asset: &str) -> PriceQuote {
        let mut quote = PriceQuote::new();
        if let Some(prices) = self.0.get(asset) {
            quote.0.insert(asset.to_string(), prices.clone());
        }
        quote
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Fetches prices for every asset in `asset_ids` against every currency
    /// in `currencies` with a single upstream call.
    async fn fetch_prices(
        &self,
        asset_ids: &[&str],
        currencies: &[&str],
    ) -> Result<PriceQuote, ExchangeError>;
}
