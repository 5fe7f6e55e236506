use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::error::ExchangeError;
use super::price::{PriceOracle, PriceQuote};

type Calls = Arc<Mutex<Vec<(Vec<String>, Vec<String>)>>>;

/// In-memory oracle returning a canned quote and recording every request.
pub struct StubOracle {
    response: Result<PriceQuote, ExchangeError>,
    calls: Calls,
}

impl StubOracle {
    pub fn with_json(json: &str) -> Self {
        Self {
            response: Ok(serde_json::from_str(json).expect("valid quote json")),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(ExchangeError::OracleUnavailable(message.to_string())),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Calls {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PriceOracle for StubOracle {
    async fn fetch_prices(
        &self,
        asset_ids: &[&str],
        currencies: &[&str],
    ) -> Result<PriceQuote, ExchangeError> {
        self.calls.lock().unwrap().push((
            asset_ids.iter().map(|s| s.to_string()).collect(),
            currencies.iter().map(|s| s.to_string()).collect(),
        ));
        self.response.clone()
    }
}
