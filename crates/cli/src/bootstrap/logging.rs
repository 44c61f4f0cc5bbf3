use ferrous_lookup_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr so stdout carries only results.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.is_json() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
