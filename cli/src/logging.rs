// Logging for the CLI, powered by tracing-subscriber.
//
// Library crates log through the `log` facade; `tracing_log::LogTracer` routes
// those records into the subscriber installed here. Output goes to stderr so
// stdout stays pure JSON.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text: timestamp LEVEL target - message
    Compact,
    /// JSON Lines
    Json,
}

impl LogFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Build the `EnvFilter`. `RUST_LOG` wins over the CLI flag when set.
pub fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    EnvFilter::try_new(level)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", level, e))
}

/// Install the global subscriber and the `log` bridge.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = build_env_filter(level)?;

    let layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    };

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer))
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    tracing_log::LogTracer::init()
        .map_err(|e| anyhow::anyhow!("Failed to bridge log records: {}", e))?;

    tracing::trace!("Logging initialized: level={}, format={:?}", level, format);
    Ok(())
}
