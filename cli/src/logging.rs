use clientes_core::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so rendered screens on stdout stay clean. A level that
/// does not parse as a filter falls back to `warn`.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // An already-installed subscriber wins.
    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
