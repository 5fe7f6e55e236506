use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use pxr::cli::client::ExchangeClient;
use pxr::cli::convert::ConvertWidget;
use pxr::cli::swap::SwapWidget;
use pxr::cli::widget::WidgetState;
use pxr::core::config::AppConfig;
use pxr::providers::CoinGeckoProvider;
use pxr::server::{AppState, router};

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// CoinGecko stand-in answering `simple/price` for one id/currency query.
    pub async fn create_oracle_mock(
        ids: &str,
        vs_currencies: &str,
        status: u16,
        body: &str,
    ) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", ids))
            .and(query_param("vs_currencies", vs_currencies))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }
}

async fn spawn_service(oracle_url: &str) -> (SocketAddr, AppConfig) {
    let mut config = AppConfig::default();
    config.providers.coingecko.base_url = oracle_url.to_string();
    config.providers.coingecko.timeout_secs = 2;

    let oracle = Arc::new(CoinGeckoProvider::new(&config.providers.coingecko).unwrap());
    let app = router(AppState::new(oracle, &config), &config.server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    info!(%addr, "Service under test listening");

    config.client.service_url = format!("http://{addr}");
    (addr, config)
}

#[test_log::test(tokio::test)]
async fn test_convert_flow_end_to_end() {
    let oracle =
        test_utils::create_oracle_mock("pi-network", "usd", 200, r#"{"pi-network":{"usd":0.5}}"#)
            .await;
    let (addr, config) = spawn_service(&oracle.uri()).await;

    let response = reqwest::get(format!("http://{addr}/convert/USD")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"pi-network": {"usd": 0.5}}));

    let client = ExchangeClient::new(&config.client.service_url).unwrap();
    let mut widget = ConvertWidget::new(&client, &config.exchange.base_asset);
    widget.submit("usd", 10.0).await.unwrap();
    match widget.state() {
        WidgetState::Success(result) => assert_eq!(result.value, 5.0),
        other => panic!("Expected success, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_swap_flow_end_to_end() {
    let oracle = test_utils::create_oracle_mock(
        "pi-network,bitcoin",
        "usd",
        200,
        r#"{"pi-network":{"usd":0.5},"bitcoin":{"usd":50000}}"#,
    )
    .await;
    let (_, config) = spawn_service(&oracle.uri()).await;

    let client = ExchangeClient::new(&config.client.service_url).unwrap();
    let mut widget = SwapWidget::new(&client);
    widget.submit("pi-network", "bitcoin", 2.0).await.unwrap();

    match widget.state() {
        WidgetState::Success(result) => {
            assert!((result.rate - 0.00001).abs() < 1e-15);
            assert!((result.converted_amount - 0.00002).abs() < 1e-15);
        }
        other => panic!("Expected success, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_collapses_to_generic_error() {
    let oracle =
        test_utils::create_oracle_mock("pi-network", "xyz", 200, r#"{"pi-network":{}}"#).await;
    let (addr, _) = spawn_service(&oracle.uri()).await;

    let response = reqwest::get(format!("http://{addr}/convert/xyz")).await.unwrap();
    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"error": "Failed to fetch exchange rate"})
    );
}

#[test_log::test(tokio::test)]
async fn test_oracle_outage_is_reported_not_crashed() {
    let oracle = test_utils::create_oracle_mock("pi-network,bitcoin", "usd", 503, "").await;
    let (addr, config) = spawn_service(&oracle.uri()).await;

    let response = reqwest::get(format!("http://{addr}/swap/pi-network/bitcoin"))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let client = ExchangeClient::new(&config.client.service_url).unwrap();
    let mut widget = SwapWidget::new(&client);
    widget.submit("pi-network", "bitcoin", 1.0).await.unwrap();
    assert!(matches!(widget.state(), WidgetState::Failed(_)));
}

#[test_log::test(tokio::test)]
async fn test_run_command_against_live_service() {
    let oracle =
        test_utils::create_oracle_mock("pi-network", "eur", 200, r#"{"pi-network":{"eur":0.42}}"#)
            .await;
    let (_, config) = spawn_service(&oracle.uri()).await;

    let result = pxr::run_command(
        pxr::AppCommand::Convert {
            currency: "eur".to_string(),
            amount: 3.0,
        },
        &config,
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_load_config_from_file() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
        server:
          port: 5055
        providers:
          coingecko:
            base_url: "http://localhost:9000"
        log_level: "warn"
    "#;
    std::fs::write(config_file.path(), config_content).expect("Failed to write config file");

    let config = pxr::load_config(Some(config_file.path().to_str().unwrap()));
    let config = config.expect("config should load");
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.exchange.base_asset, "pi-network");
}
