//! Diagnostic logging setup.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "BAZAAR_LOG";

/// Install the global subscriber, writing to stderr.
///
/// `verbose` forces `debug`; otherwise `BAZAAR_LOG` wins over the
/// configured level.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = filter_for(config, verbose, std::env::var(LOG_ENV).ok().as_deref())?;

    let json_layer = (config.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let human_layer = (config.format == LogFormat::Human).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(human_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}

fn filter_for(config: &LoggingConfig, verbose: bool, env: Option<&str>) -> Result<EnvFilter> {
    let directive = match (verbose, env) {
        (true, _) => "debug",
        (false, Some(env)) if !env.trim().is_empty() => env,
        (false, _) => config.level.as_str(),
    };
    EnvFilter::try_new(directive).map_err(|e| anyhow!("Invalid log filter {directive:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig::default();
        let filter = filter_for(&config, true, Some("error")).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_env_overrides_config_level() {
        let config = LoggingConfig::default();
        let filter = filter_for(&config, false, Some("bazaar_commerce=trace")).unwrap();
        assert_eq!(filter.to_string(), "bazaar_commerce=trace");

        let filter = filter_for(&config, false, None).unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = filter_for(&config, false, Some("  ")).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_bad_directive_is_error() {
        let config = LoggingConfig {
            level: "bazaar=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(filter_for(&config, false, None).is_err());
    }
}
