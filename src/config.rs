use std::env;
use std::path::PathBuf;

use crate::error::PacingError;
use crate::models::Strategy;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const BENCHMARKS_PATH_VAR: &str = "PACER_BENCHMARKS_PATH";
const DEFAULT_STRATEGY_VAR: &str = "PACER_DEFAULT_STRATEGY";
const LOG_FILTER_VAR: &str = "PACER_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct PacerConfig {
  /// Benchmark JSON on disk; `None` uses the embedded table
  pub benchmarks_path: Option<PathBuf>,
  /// Strategy for boundary requests that do not name one
  pub default_strategy: Strategy,
  pub log_filter: String,
}

impl Default for PacerConfig {
  fn default() -> Self {
    Self {
      benchmarks_path: None,
      default_strategy: Strategy::Weighted,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl PacerConfig {
  pub fn from_env() -> Result<Self, PacingError> {
    let benchmarks_path = non_empty_var(BENCHMARKS_PATH_VAR).map(PathBuf::from);

    let default_strategy = match non_empty_var(DEFAULT_STRATEGY_VAR) {
      Some(value) => value.parse::<Strategy>().map_err(|e| {
        PacingError::Configuration(format!("{}: {}", DEFAULT_STRATEGY_VAR, e))
      })?,
      None => Strategy::Weighted,
    };

    let log_filter = non_empty_var(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    Ok(Self {
      benchmarks_path,
      default_strategy,
      log_filter,
    })
  }
}

fn non_empty_var(key: &str) -> Option<String> {
  env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_from_env_defaults() {
    temp_env::with_vars_unset(
      [BENCHMARKS_PATH_VAR, DEFAULT_STRATEGY_VAR, LOG_FILTER_VAR],
      || {
        let config = PacerConfig::from_env().unwrap();
        assert_eq!(config, PacerConfig::default());
      },
    );
  }

  #[test]
  #[serial]
  fn test_from_env_overrides() {
    temp_env::with_vars(
      [
        (BENCHMARKS_PATH_VAR, Some("/etc/pacer/benchmarks.json")),
        (DEFAULT_STRATEGY_VAR, Some("benchmark_fatigue")),
        (LOG_FILTER_VAR, Some("race_pacer=debug")),
      ],
      || {
        let config = PacerConfig::from_env().unwrap();
        assert_eq!(config.benchmarks_path, Some(PathBuf::from("/etc/pacer/benchmarks.json")));
        assert_eq!(config.default_strategy, Strategy::BenchmarkFatigue);
        assert_eq!(config.log_filter, "race_pacer=debug");
      },
    );
  }

  #[test]
  #[serial]
  fn test_unknown_strategy_is_configuration_error() {
    temp_env::with_var(DEFAULT_STRATEGY_VAR, Some("fastest"), || {
      assert!(matches!(PacerConfig::from_env(), Err(PacingError::Configuration(_))));
    });
  }

  #[test]
  #[serial]
  fn test_blank_values_are_ignored() {
    temp_env::with_vars(
      [(BENCHMARKS_PATH_VAR, Some("  ")), (LOG_FILTER_VAR, Some(""))],
      || {
        let config = PacerConfig::from_env().unwrap();
        assert!(config.benchmarks_path.is_none());
        assert_eq!(config.log_filter, "info");
      },
    );
  }
}
