use focuslog_core::Config;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `FOCUSLOG_LOG` overrides the configured level.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_env("FOCUSLOG_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
