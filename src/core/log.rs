use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// `verbose` forces debug output; otherwise `level` applies, with `RUST_LOG`
/// taking precedence over both.
pub fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    let app_level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let app_filter = Targets::new()
        .with_target("pxr", app_level)
        .with_target("tower_http", app_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
