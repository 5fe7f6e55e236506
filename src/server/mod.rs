//! HTTP front for the conversion and swap services.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::config::{AppConfig, ServerConfig};
use crate::core::{ConversionService, PriceOracle, SwapService};
use crate::providers::CoinGeckoProvider;

/// Services shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub conversion: Arc<ConversionService>,
    pub swap: Arc<SwapService>,
}

impl AppState {
    pub fn new(oracle: Arc<dyn PriceOracle>, config: &AppConfig) -> Self {
        AppState {
            conversion: Arc::new(ConversionService::new(
                Arc::clone(&oracle),
                &config.exchange,
            )),
            swap: Arc::new(SwapService::new(oracle, &config.exchange)),
        }
    }
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/convert/:currency", get(handlers::convert))
        .route("/swap/:from/:to", get(handlers::swap))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
            .allow_origin(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Binds the configured address and serves until ctrl-c.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let oracle: Arc<dyn PriceOracle> =
        Arc::new(CoinGeckoProvider::new(&config.providers.coingecko)?);
    let app = router(AppState::new(oracle, config), &config.server);

    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        oracle = %config.providers.coingecko.base_url,
        "Exchange service listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")
}
