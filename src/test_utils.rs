//! Test utilities shared across unit tests
//!
//! - Benchmark table and state factories
//! - Request factories
//! - Helper assertions

use crate::benchmarks::{BenchmarkStore, BenchmarkTable};
use crate::commands::pacing::PacerRequest;
use crate::config::PacerConfig;
use crate::models::{SegmentResult, Strategy};
use crate::segments::SegmentKind;
use crate::time_codec::Seconds;
use crate::PacerState;

/// ---------------------------------------------------------------------------
/// Factories
/// ---------------------------------------------------------------------------

/// The embedded benchmark table
pub fn benchmark_table() -> BenchmarkTable {
  BenchmarkTable::embedded().expect("embedded benchmark data must parse")
}

/// State with default config and the embedded table
pub fn test_state() -> PacerState {
  PacerState {
    config: PacerConfig::default(),
    benchmarks: BenchmarkStore::new(benchmark_table()),
  }
}

/// Boundary request with only the required fields set
pub fn pacer_request(target_time: &str, category: &str) -> PacerRequest {
  PacerRequest {
    target_time: target_time.to_string(),
    category: category.to_string(),
    preferred_run_pace: None,
    roxzone_minutes: None,
    is_elite: false,
    athlete_level: None,
    strategy: Some(Strategy::Weighted),
  }
}

/// ---------------------------------------------------------------------------
/// Assertions
/// ---------------------------------------------------------------------------

/// Segments plus transition budget must add up to the target exactly
pub fn assert_exact_sum(segments: &[SegmentResult], roxzone_seconds: Seconds, target: Seconds) {
  let total: Seconds = segments.iter().map(|s| s.seconds).sum::<Seconds>() + roxzone_seconds;
  assert_eq!(
    total, target,
    "segments + roxzone = {} but target is {}",
    total, target
  );
}

pub fn run_seconds(segments: &[SegmentResult]) -> Vec<Seconds> {
  segments
    .iter()
    .filter(|s| s.kind == SegmentKind::Run)
    .map(|s| s.seconds)
    .collect()
}
