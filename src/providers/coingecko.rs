use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, error, instrument};

use crate::core::config::CoinGeckoProviderConfig;
use crate::core::{ExchangeError, PriceOracle, PriceQuote};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Price oracle backed by the CoinGecko `simple/price` endpoint.
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(config: &CoinGeckoProviderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).context("Invalid CoinGecko API key")?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .user_agent("pxr/1.0")
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CoinGeckoProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoProvider {
    #[instrument(
        name = "CoinGeckoPriceFetch",
        skip(self),
        fields(ids = ?asset_ids, currencies = ?currencies)
    )]
    async fn fetch_prices(
        &self,
        asset_ids: &[&str],
        currencies: &[&str],
    ) -> Result<PriceQuote, ExchangeError> {
        if asset_ids.is_empty() || currencies.is_empty() {
            return Err(ExchangeError::InvalidInput(
                "at least one asset and one currency are required".to_string(),
            ));
        }

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            asset_ids.join(","),
            currencies.join(",")
        );
        debug!("Requesting prices from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Price oracle request failed");
            ExchangeError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Price oracle returned an error status");
            return Err(ExchangeError::OracleUnavailable(format!(
                "HTTP error: {status}"
            )));
        }

        let text = response.text().await?;
        let quote: PriceQuote = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse price response");
            ExchangeError::OracleUnavailable(format!("Failed to parse price response: {e}"))
        })?;

        for id in asset_ids {
            for currency in currencies {
                if quote.price(id, currency).is_some_and(|p| p < 0.0) {
                    return Err(ExchangeError::OracleUnavailable(format!(
                        "Negative price for {id} in {currency}"
                    )));
                }
            }
        }

        debug!(quote = ?quote, "Received CoinGecko quote");
        Ok(quote)
    }
}
