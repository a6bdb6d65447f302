use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PacingError {
  /// Malformed duration text. Never defaulted to zero.
  #[error("Invalid time format: {0}")]
  Format(String),

  #[error("Target time is not achievable: {0}")]
  InfeasibleTarget(String),

  /// Benchmark data or environment configuration is unusable. Fatal at startup.
  #[error("Configuration error: {0}")]
  Configuration(String),

  #[error("Invalid input: {0}")]
  InvalidInput(String),
}

impl From<serde_json::Error> for PacingError {
  fn from(e: serde_json::Error) -> Self {
    PacingError::Configuration(format!("Failed to parse benchmark data: {}", e))
  }
}
