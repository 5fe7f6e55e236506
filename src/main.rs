use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use pxr::cli::{convert, swap};
use pxr::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the conversion and swap HTTP service
    Serve,
    /// Convert Pi Coin into another currency
    Convert {
        /// Target currency code
        #[arg(long, default_value = convert::DEFAULT_CURRENCY)]
        currency: String,
        /// Amount of Pi Coin to convert
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Swap one crypto asset into another
    Swap {
        /// Asset to swap from
        #[arg(long, default_value = swap::DEFAULT_FROM)]
        from: String,
        /// Asset to swap to
        #[arg(long, default_value = swap::DEFAULT_TO)]
        to: String,
        /// Amount of the source asset
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        amount: f64,
    },
}

impl From<Commands> for pxr::AppCommand {
    fn from(cmd: Commands) -> pxr::AppCommand {
        match cmd {
            Commands::Serve => pxr::AppCommand::Serve,
            Commands::Convert { currency, amount } => pxr::AppCommand::Convert { currency, amount },
            Commands::Swap { from, to, amount } => pxr::AppCommand::Swap { from, to, amount },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Setup)) {
        init_logging(cli.verbose, "info");
        return pxr::cli::setup::setup();
    }

    let config = pxr::load_config(cli.config_path.as_deref());
    let level = match (&cli.command, &config) {
        (Some(Commands::Serve), Ok(config)) => config.log_level.as_str(),
        _ => "off",
    };
    init_logging(cli.verbose, level);

    let result = match cli.command {
        Some(cmd) => match config {
            Ok(config) => pxr::run_command(cmd.into(), &config).await,
            Err(e) => Err(e),
        },
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
