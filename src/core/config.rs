use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

use super::validate::normalize_identifier;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address: {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CoinGeckoProviderConfig {
    fn default() -> Self {
        CoinGeckoProviderConfig {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl CoinGeckoProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub coingecko: CoinGeckoProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Asset every conversion is priced from.
    pub base_asset: String,
    /// Currency both legs of a swap are priced in.
    pub reference_currency: String,
}

impl ExchangeConfig {
    /// Trims and lowercases both identifiers so they match the keys the
    /// oracle answers with.
    pub fn normalize(&mut self) -> Result<()> {
        self.base_asset = normalize_identifier("exchange.base_asset", &self.base_asset)?;
        self.reference_currency =
            normalize_identifier("exchange.reference_currency", &self.reference_currency)?;
        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            base_asset: "pi-network".to_string(),
            reference_currency: "usd".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub service_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            service_url: "http://localhost:5000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            exchange: ExchangeConfig::default(),
            client: ClientConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "pxr", "pxr")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies `PXR_PORT` and `PXR_ORACLE_URL` on top of the file values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(
            std::env::var("PXR_PORT").ok(),
            std::env::var("PXR_ORACLE_URL").ok(),
        )
    }

    fn apply_overrides(&mut self, port: Option<String>, oracle_url: Option<String>) -> Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .with_context(|| format!("PXR_PORT is not a valid port: {port}"))?;
            debug!(port = self.server.port, "Port overridden from environment");
        }
        if let Some(url) = oracle_url {
            debug!(%url, "Oracle URL overridden from environment");
            self.providers.coingecko.base_url = url;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.providers.coingecko.timeout_secs == 0 {
            bail!("providers.coingecko.timeout_secs must be non-zero");
        }
        for (name, url) in [
            ("providers.coingecko.base_url", &self.providers.coingecko.base_url),
            ("client.service_url", &self.client.service_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{name} must be an http(s) URL, got: {url}");
            }
        }
        for (name, value) in [
            ("exchange.base_asset", &self.exchange.base_asset),
            ("exchange.reference_currency", &self.exchange.reference_currency),
        ] {
            let normalized = normalize_identifier(name, value)?;
            if &normalized != value {
                bail!("{name} must be a lowercase identifier, got: {value}");
            }
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            bail!(
                "log_level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                self.log_level
            );
        }
        Ok(())
    }
}
