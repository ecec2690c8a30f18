//! Logging setup for the radixmap binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter
pub const LOG_ENV: &str = "RADIXMAP_LOG";

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for radixmap targets (default: WARN)
    pub level: Level,
    /// Whether to use ANSI colors (default: false, output goes to stderr)
    pub colorize: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            colorize: false,
        }
    }
}

impl LoggingConfig {
    /// Map a `-v` count to a level: 0 is WARN, each step is one level more verbose
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            let level = self.level.as_str().to_lowercase();
            EnvFilter::new(format!("radixmap={level}"))
        })
    }
}

/// Install a stderr subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_ansi(config.colorize)
        .with_target(false)
        .try_init();
}
