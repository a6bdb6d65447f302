pub mod benchmarks;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod fatigue;
pub mod logging;
pub mod models;
pub mod pace_calc;
pub mod partner;
pub mod segments;
pub mod time_codec;
pub mod weighted;

#[cfg(test)]
mod test_utils;

use benchmarks::BenchmarkStore;
use config::PacerConfig;
use tracing::info;

pub use error::PacingError;
pub use models::{AthleteLevel, PacingRequest, PacingResult, SegmentResult, Strategy};

/// Process-wide state: configuration plus the benchmark snapshot holder
pub struct PacerState {
  pub config: PacerConfig,
  pub benchmarks: BenchmarkStore,
}

/// Load `.env`, read configuration, install logging and load benchmark data.
/// Any error here is fatal: nothing can be planned without benchmark data.
pub fn init() -> Result<PacerState, PacingError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = PacerConfig::from_env()?;
  logging::init_tracing(&config.log_filter);

  let benchmarks = BenchmarkStore::load(config.benchmarks_path.as_deref())?;
  info!(default_strategy = %config.default_strategy, "Pacer ready");

  Ok(PacerState { config, benchmarks })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_init_with_embedded_benchmarks() {
    temp_env::with_vars_unset(["PACER_BENCHMARKS_PATH", "PACER_DEFAULT_STRATEGY"], || {
      let state = init().unwrap();
      assert_eq!(state.config.default_strategy, Strategy::Weighted);
      assert_eq!(state.benchmarks.snapshot().row("PRO").0.run_base, 300);
    });
  }

  #[test]
  #[serial]
  fn test_init_fails_on_missing_benchmark_file() {
    temp_env::with_var("PACER_BENCHMARKS_PATH", Some("/nonexistent/benchmarks.json"), || {
      assert!(matches!(init(), Err(PacingError::Configuration(_))));
    });
  }
}
