//! Configuration for the linking stage.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_LINKER_INITIAL_CAPACITY,
    DEFAULT_LINKER_INTAKE_CAPACITY,
    DEFAULT_LINKER_LOG_PERIOD_SECONDS,
    MAX_LINKER_INITIAL_CAPACITY,
};
use super::error::{LinkerError, LinkerResult};

const fn default_initial_capacity() -> usize {
    DEFAULT_LINKER_INITIAL_CAPACITY
}

const fn default_log_period() -> u64 {
    DEFAULT_LINKER_LOG_PERIOD_SECONDS
}

const fn default_intake_capacity() -> usize {
    DEFAULT_LINKER_INTAKE_CAPACITY
}

/// Configuration for the consensus linker.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Number of events the linker index is sized for at startup.
    #[clap(name = "linker-initial-capacity", long, default_value_t = default_initial_capacity())]
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Minimum number of seconds between two log lines for the same
    /// linking failure mode. Failures in between are only counted.
    #[clap(name = "linker-log-period", long, default_value_t = default_log_period())]
    #[serde(default = "default_log_period")]
    pub log_period: u64,

    /// Number of pending inputs and outputs buffered by the intake stage.
    #[clap(name = "linker-intake-capacity", long, default_value_t = default_intake_capacity())]
    #[serde(default = "default_intake_capacity")]
    pub intake_capacity: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_LINKER_INITIAL_CAPACITY,
            log_period: DEFAULT_LINKER_LOG_PERIOD_SECONDS,
            intake_capacity: DEFAULT_LINKER_INTAKE_CAPACITY,
        }
    }
}

impl LinkerConfig {
    pub fn log_period(&self) -> Duration {
        Duration::from_secs(self.log_period)
    }

    pub fn validate(&self) -> LinkerResult<()> {
        if self.initial_capacity == 0 {
            return Err(LinkerError::InvalidConfig(
                "linker initial capacity must be greater than zero".to_string(),
            ));
        }

        if self.initial_capacity > MAX_LINKER_INITIAL_CAPACITY {
            return Err(LinkerError::InvalidConfig(format!(
                "linker initial capacity {} exceeds maximum {}",
                self.initial_capacity, MAX_LINKER_INITIAL_CAPACITY
            )));
        }

        if self.intake_capacity == 0 {
            return Err(LinkerError::InvalidConfig(
                "linker intake capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[clap(flatten)]
        linker: LinkerConfig,
    }

    #[test]
    fn test_default_config() {
        let config = LinkerConfig::default();
        assert_eq!(config.initial_capacity, DEFAULT_LINKER_INITIAL_CAPACITY);
        assert_eq!(config.log_period(), Duration::from_secs(60));
        assert_eq!(config.intake_capacity, DEFAULT_LINKER_INTAKE_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "node",
            "--linker-initial-capacity",
            "64",
            "--linker-log-period",
            "5",
        ]);
        assert_eq!(cli.linker.initial_capacity, 64);
        assert_eq!(cli.linker.log_period, 5);
        assert_eq!(cli.linker.intake_capacity, DEFAULT_LINKER_INTAKE_CAPACITY);
    }

    #[test]
    fn test_cli_defaults_match_default_impl() {
        let cli = Cli::parse_from(["node"]);
        assert_eq!(cli.linker, LinkerConfig::default());
    }

    #[test]
    fn test_serde_defaults() {
        let config: LinkerConfig = serde_json::from_str(r#"{"log_period": 1}"#).unwrap();
        assert_eq!(config.log_period, 1);
        assert_eq!(config.initial_capacity, DEFAULT_LINKER_INITIAL_CAPACITY);
        assert_eq!(config.intake_capacity, DEFAULT_LINKER_INTAKE_CAPACITY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LinkerConfig::default();
        config.intake_capacity = 0;
        assert!(matches!(config.validate(), Err(LinkerError::InvalidConfig(_))));

        let mut config = LinkerConfig::default();
        config.initial_capacity = MAX_LINKER_INITIAL_CAPACITY + 1;
        assert!(matches!(config.validate(), Err(LinkerError::InvalidConfig(_))));

        let mut config = LinkerConfig::default();
        config.initial_capacity = 0;
        assert!(matches!(config.validate(), Err(LinkerError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_cli_capacity() {
        let huge = usize::MAX.to_string();
        let cli = Cli::parse_from(["node", "--linker-initial-capacity", huge.as_str()]);
        assert_eq!(cli.linker.initial_capacity, usize::MAX);
        assert!(matches!(cli.linker.validate(), Err(LinkerError::InvalidConfig(_))));
    }
}
