//! Thin HTTP client the widgets use to reach the exchange service.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::core::PriceQuote;
use crate::server::error::ErrorBody;
use crate::server::handlers::RateResponse;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("A request is already in flight")]
    Busy,

    #[error("Service error ({status}): {message}")]
    Service { status: StatusCode, message: String },

    #[error("Could not reach the exchange service: {0}")]
    Transport(String),

    #[error("Rate for {asset} in {currency} missing from the service response")]
    RateMissing { asset: String, currency: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        WidgetError::Transport(err.to_string())
    }
}

pub struct ExchangeClient {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeClient {
    pub fn new(service_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("pxr/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ExchangeClient {
            base_url: service_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Unit price of `base_asset` in `currency`, via `GET /convert/:currency`.
    pub async fn unit_price(&self, base_asset: &str, currency: &str) -> Result<f64, WidgetError> {
        let url = format!("{}/convert/{}", self.base_url, currency);
        let quote: PriceQuote = self.get_json(&url).await?;
        quote
            .price(base_asset, currency)
            .ok_or_else(|| WidgetError::RateMissing {
                asset: base_asset.to_string(),
                currency: currency.to_string(),
            })
    }

    /// Cross rate via `GET /swap/:from/:to`.
    pub async fn swap_rate(&self, from: &str, to: &str) -> Result<f64, WidgetError> {
        let url = format!("{}/swap/{}/{}", self.base_url, from, to);
        let body: RateResponse = self.get_json(&url).await?;
        Ok(body.rate)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, WidgetError> {
        debug!("Requesting {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(WidgetError::Service { status, message });
        }
        Ok(response.json::<T>().await?)
    }
}
