pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Convert { currency: String, amount: f64 },
    Swap { from: String, to: String, amount: f64 },
}

/// Reads the config file (or defaults), applies environment overrides and
/// validates the result. Called once at startup.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides()?;
    config.exchange.normalize()?;
    config.validate()?;
    Ok(config)
}

pub async fn run_command(command: AppCommand, config: &AppConfig) -> Result<()> {
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve => {
            info!("pxr exchange service starting...");
            server::serve(config).await
        }
        AppCommand::Convert { currency, amount } => {
            let client = cli::client::ExchangeClient::new(&config.client.service_url)?;
            cli::convert::run(&client, &config.exchange.base_asset, &currency, amount).await
        }
        AppCommand::Swap { from, to, amount } => {
            let client = cli::client::ExchangeClient::new(&config.client.service_url)?;
            cli::swap::run(&client, &from, &to, amount).await
        }
    }
}
