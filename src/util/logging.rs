//! Structured logging setup
//!
//! Installs a `tracing` subscriber writing to stderr, so a report printed on
//! stdout stays machine-readable. `RUST_LOG` overrides the computed filter when
//! set.
//!
//! ```no_run
//! use litscout::util::logging;
//!
//! logging::init_from_env();
//! tracing::info!(codebase = "demo", "Analysis started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "LITSCOUT_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "LITSCOUT_LOG_JSON";

/// Crates whose debug output drowns ours
const NOISY_TARGETS: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "rustls"];

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for litscout's own events
    pub level: Level,

    /// One JSON object per line instead of human-readable output
    pub use_json: bool,

    pub include_target: bool,

    /// File and line of each event
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `LITSCOUT_LOG_LEVEL` and `LITSCOUT_LOG_JSON`. Unknown values keep the
    /// defaults.
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| parse_level(&v))
            .unwrap_or(Level::INFO);

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Filter directives used when `RUST_LOG` is unset
    fn directives(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        let mut directives = vec![format!("litscout={}", level)];
        directives.extend(NOISY_TARGETS.iter().map(|target| format!("{}=warn", target)));
        directives.join(",")
    }
}

/// Case-insensitive level parse
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directives()));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use yare::parameterized;

    #[parameterized(
        trace = { "trace", Level::TRACE },
        debug_mixed_case = { "Debug", Level::DEBUG },
        info = { "INFO", Level::INFO },
        warning_alias = { "warning", Level::WARN },
        error = { "error", Level::ERROR },
    )]
    fn test_parse_level(input: &str, expected: Level) {
        assert_eq!(parse_level(input), Some(expected));
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_directives_quiet_http_stack() {
        let directives = LoggingConfig::with_level(Level::DEBUG).directives();
        assert!(directives.starts_with("litscout=debug"));
        assert!(directives.contains("reqwest=warn"));
        assert!(directives.contains("hyper=warn"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var(LOG_LEVEL_ENV, "trace");
        env::set_var(LOG_JSON_ENV, "true");

        let config = LoggingConfig::from_env();

        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);

        assert_eq!(config.level, Level::TRACE);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_garbage() {
        env::set_var(LOG_LEVEL_ENV, "loud");
        env::set_var(LOG_JSON_ENV, "yes please");

        let config = LoggingConfig::from_env();

        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);

        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
    }
}
