//! Benchmark-fatigue strategy
//!
//! Station times are scaled from the tier's benchmark row by how the athlete's
//! run pace compares with the benchmark run pace. From the third station on a
//! compounding fatigue multiplier applies. Non-elite athletes get hard floors
//! on the capped stations. A final reconciliation pass pushes the rounding
//! drift onto the uncapped stations so the plan hits the target exactly.

use tracing::{debug, warn};

use crate::benchmarks::BenchmarkTable;
use crate::engine::{exercise_budget, Allocation, MIN_STATION_SECONDS};
use crate::error::PacingError;
use crate::models::{AthleteLevel, PacingRequest, SegmentResult};
use crate::segments::{BenchmarkKey, SegmentKind, SEGMENT_TABLE};
use crate::time_codec::Seconds;

/// ---------------------------------------------------------------------------
/// Model constants
/// ---------------------------------------------------------------------------

pub const FATIGUE_BASE: f64 = 1.02;
pub const ELITE_FATIGUE_BASE: f64 = 1.01;

/// Fatigue starts compounding after this many stations
pub const FRESH_STATIONS: usize = 2;

/// Extra cost of non-erg stations for recreational athletes
pub const RECREATIONAL_STATION_FACTOR: f64 = 1.15;

/// Drift up to this size is not spread across stations
pub const RECONCILE_TOLERANCE: i64 = 5;

/// Fallback run pace is target / 16
const PACE_HEURISTIC_DIVISOR: Seconds = 16;

/// ---------------------------------------------------------------------------
/// Per-station model
/// ---------------------------------------------------------------------------

/// Multiplier for the station at 1-based `index`
pub fn fatigue_multiplier(index: usize, level: AthleteLevel) -> f64 {
  if index <= FRESH_STATIONS {
    return 1.0;
  }
  let base = match level {
    AthleteLevel::Elite => ELITE_FATIGUE_BASE,
    _ => FATIGUE_BASE,
  };
  base.powi((index - FRESH_STATIONS) as i32)
}

/// Unrounded station time before floors
pub fn modeled_station_seconds(
  benchmark: Seconds,
  pace_ratio: f64,
  index: usize,
  key: BenchmarkKey,
  level: AthleteLevel,
) -> f64 {
  let mut seconds = benchmark as f64 * pace_ratio * fatigue_multiplier(index, level);
  if level == AthleteLevel::Recreational && !key.is_erg() {
    seconds *= RECREATIONAL_STATION_FACTOR;
  }
  seconds
}

/// ---------------------------------------------------------------------------
/// Allocation
/// ---------------------------------------------------------------------------

pub fn allocate(
  request: &PacingRequest,
  table: &BenchmarkTable,
  roxzone_seconds: Seconds,
) -> Result<Allocation, PacingError> {
  let active_budget = request.target_total.saturating_sub(roxzone_seconds);
  if let Some(pace) = request.preferred_run_pace {
    exercise_budget(active_budget, pace)?;
  }

  let (row, benchmark_key) = table.row(request.category.benchmark_key());
  let run_pace = request
    .preferred_run_pace
    .unwrap_or(request.target_total / PACE_HEURISTIC_DIVISOR);
  let pace_ratio = run_pace as f64 / row.run_base as f64;
  let bypass_floors = request.bypasses_floors();

  debug!(
    benchmark_key,
    run_pace,
    pace_ratio,
    level = %request.athlete_level,
    "Running benchmark-fatigue model"
  );

  let mut station_index = 0;
  let mut segments: Vec<SegmentResult> = SEGMENT_TABLE
    .iter()
    .map(|segment| match (segment.kind, segment.benchmark_key) {
      (SegmentKind::Exercise, Some(key)) => {
        station_index += 1;
        let modeled = modeled_station_seconds(
          row.station(key),
          pace_ratio,
          station_index,
          key,
          request.athlete_level,
        );
        let mut seconds = modeled.round() as Seconds;
        if !bypass_floors {
          if let Some(floor) = key.floor_seconds() {
            seconds = seconds.max(floor);
          }
        }
        SegmentResult::new(segment.name, segment.kind, seconds)
      }
      _ => SegmentResult::new(segment.name, segment.kind, run_pace),
    })
    .collect();

  let warning = reconcile(&mut segments, request.target_total, roxzone_seconds);

  for (segment, entry) in segments.iter_mut().zip(SEGMENT_TABLE.iter()) {
    if entry.benchmark_key.is_some_and(|k| k.is_erg()) {
      // Ergs are 1000 m
      let pace = segment.seconds / 2;
      segment.set_pace_per_500m(pace);
    }
  }

  Ok(Allocation {
    segments,
    warning,
    benchmark_key: Some(benchmark_key.to_string()),
  })
}

/// Force `segments + roxzone == target`. Returns a warning if some drift
/// could not be absorbed.
fn reconcile(segments: &mut [SegmentResult], target: Seconds, roxzone_seconds: Seconds) -> Option<String> {
  let actual: i64 = segments.iter().map(|s| s.seconds as i64).sum::<i64>() + roxzone_seconds as i64;
  let diff = target as i64 - actual;
  if diff == 0 {
    return None;
  }

  let adjustable: Vec<usize> = SEGMENT_TABLE
    .iter()
    .enumerate()
    .filter(|(_, s)| s.benchmark_key.is_some_and(|k| k.floor_seconds().is_none()))
    .map(|(i, _)| i)
    .collect();

  if adjustable.is_empty() {
    warn!(residual = diff, "No adjustable station to reconcile against");
    return Some(unresolved_warning(diff));
  }

  let count = adjustable.len() as i64;
  let per_station = if diff.abs() > RECONCILE_TOLERANCE {
    diff / count
  } else {
    0
  };

  let mut residual = diff;
  for (pos, &i) in adjustable.iter().enumerate() {
    let share = if pos == adjustable.len() - 1 {
      residual
    } else {
      per_station
    };
    let current = segments[i].seconds as i64;
    let adjusted = (current + share).max(MIN_STATION_SECONDS as i64);
    residual -= adjusted - current;
    segments[i].set_seconds(adjusted as Seconds);
  }

  // Stations clamped at the minimum push their share back; let the others take it
  if residual != 0 {
    for &i in adjustable.iter().rev() {
      if residual == 0 {
        break;
      }
      let current = segments[i].seconds as i64;
      let adjusted = (current + residual).max(MIN_STATION_SECONDS as i64);
      residual -= adjusted - current;
      segments[i].set_seconds(adjusted as Seconds);
    }
  }

  debug!(diff, per_station, residual, "Reconciled plan against target");

  if residual != 0 {
    warn!(residual, "Plan could not be reconciled exactly");
    return Some(unresolved_warning(residual));
  }
  None
}

fn unresolved_warning(residual: i64) -> String {
  let direction = if residual > 0 { "under" } else { "over" };
  format!(
    "Warning: plan is {}s {} the target time; stations could not absorb the difference.",
    residual.abs(),
    direction
  )
}
