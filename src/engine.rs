//! Pacing engine: transition budget, strategy dispatch and result assembly
//!
//! `plan` is a pure function of the request and a benchmark snapshot, so any
//! number of plans can run concurrently without locking.

use tracing::{debug, warn};

use crate::benchmarks::BenchmarkTable;
use crate::error::PacingError;
use crate::fatigue;
use crate::models::{PacingMeta, PacingRequest, PacingResult, SegmentResult, Strategy};
use crate::segments::{CategoryTier, RUN_COUNT, STATION_COUNT};
use crate::time_codec::{self, Seconds};
use crate::weighted;

/// ---------------------------------------------------------------------------
/// Transition budget ("roxzone")
/// ---------------------------------------------------------------------------

/// Share of the target reserved for transitions, in percent
pub const SOLO_ROXZONE_PERCENT: u64 = 8;
pub const DOUBLES_ROXZONE_PERCENT: u64 = 10;

/// Partner handoff time added per station for doubles
pub const DOUBLES_HANDOFF_SECONDS: Seconds = 5;

/// Transition time for a request. An explicit override is used verbatim.
pub fn transition_budget(target: Seconds, category: CategoryTier, override_seconds: Option<Seconds>) -> Seconds {
  if let Some(seconds) = override_seconds {
    return seconds;
  }
  if category.is_doubles() {
    let share = target as u64 * DOUBLES_ROXZONE_PERCENT / 100;
    share as Seconds + DOUBLES_HANDOFF_SECONDS * STATION_COUNT as Seconds
  } else {
    (target as u64 * SOLO_ROXZONE_PERCENT / 100) as Seconds
  }
}

/// No strategy hands a station less than this once runs are pinned
pub const MIN_STATION_SECONDS: Seconds = 1;

/// Time left for the stations once every run leg is pinned to `pace`
pub fn exercise_budget(active_budget: Seconds, pace: Seconds) -> Result<Seconds, PacingError> {
  let runs = pace as i64 * RUN_COUNT as i64;
  let remaining = active_budget as i64 - runs;
  if remaining <= 0 {
    return Err(PacingError::InfeasibleTarget(format!(
      "{} of running at {} per km leaves no time for stations within {}. Reduce run pace or increase target time.",
      time_codec::format(runs.min(Seconds::MAX as i64) as Seconds),
      time_codec::format(pace),
      time_codec::format(active_budget)
    )));
  }
  Ok(remaining as Seconds)
}

/// ---------------------------------------------------------------------------
/// Planning
/// ---------------------------------------------------------------------------

/// Output of a strategy before it is wrapped into a `PacingResult`
#[derive(Debug, Clone)]
pub struct Allocation {
  pub segments: Vec<SegmentResult>,
  pub warning: Option<String>,
  pub benchmark_key: Option<String>,
}

pub fn plan(request: &PacingRequest, benchmarks: &BenchmarkTable) -> Result<PacingResult, PacingError> {
  let target = request.target_total;
  let roxzone_seconds = transition_budget(target, request.category, request.roxzone_override);

  if roxzone_seconds >= target {
    return Err(PacingError::InfeasibleTarget(format!(
      "transition time {} leaves nothing of target {}",
      time_codec::format(roxzone_seconds),
      time_codec::format(target)
    )));
  }
  let active_budget = target - roxzone_seconds;

  if request.category_fallback {
    warn!(fallback = %request.category, "Unknown category, using fallback tier");
  }
  debug!(
    strategy = %request.strategy,
    category = %request.category,
    target_seconds = target,
    roxzone_seconds,
    active_budget,
    "Planning splits"
  );

  let allocation = match request.strategy {
    Strategy::Weighted => weighted::allocate(request.category, active_budget, request.preferred_run_pace)?,
    Strategy::BenchmarkFatigue => fatigue::allocate(request, benchmarks, roxzone_seconds)?,
  };

  Ok(PacingResult {
    target_time: time_codec::format(target),
    target_seconds: target,
    roxzone_seconds,
    roxzone_formatted: time_codec::format(roxzone_seconds),
    segments: allocation.segments,
    warning: allocation.warning,
    meta: PacingMeta {
      strategy: request.strategy,
      athlete_level: request.athlete_level,
      category: request.category,
      category_fallback: request.category_fallback,
      benchmark_key: allocation.benchmark_key,
    },
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::AthleteLevel;
  use crate::segments::SegmentKind;
  use crate::test_utils::{assert_exact_sum, benchmark_table};

  #[test]
  fn test_transition_budget_solo_and_doubles() {
    assert_eq!(transition_budget(5400, CategoryTier::Open, None), 432);
    assert_eq!(transition_budget(5400, CategoryTier::DoublesMen, None), 540 + 40);
    assert_eq!(transition_budget(5400, CategoryTier::DoublesPro, Some(300)), 300);
    assert_eq!(transition_budget(4800, CategoryTier::SingleOpen, Some(0)), 0);
  }

  #[test]
  fn test_exercise_budget() {
    assert_eq!(exercise_budget(4968, 360).unwrap(), 2088);
    assert!(matches!(exercise_budget(2880, 360), Err(PacingError::InfeasibleTarget(_))));
  }

  #[test]
  fn test_both_strategies_hit_target() {
    let table = benchmark_table();
    for strategy in [Strategy::Weighted, Strategy::BenchmarkFatigue] {
      for category in CategoryTier::ALL {
        for target in [3600, 4800, 5400, 7200] {
          let request = PacingRequest::new(target, category, strategy);
          let result = plan(&request, &table).unwrap();
          assert_exact_sum(&result.segments, result.roxzone_seconds, target);
          assert_eq!(result.residual_seconds(), 0);
          assert_eq!(result.segments.len(), 16);
        }
      }
    }
  }

  #[test]
  fn test_result_preserves_table_order() {
    let table = benchmark_table();
    let request = PacingRequest::new(5400, CategoryTier::Open, Strategy::Weighted);
    let result = plan(&request, &table).unwrap();
    assert_eq!(result.segments[0].name, "Run 1 (1km)");
    assert_eq!(result.segments[1].name, "Ski Erg (1000m)");
    assert_eq!(result.segments[15].name, "Wall Balls (75/100)");
    assert_eq!(result.segments[15].kind, SegmentKind::Exercise);
  }

  #[test]
  fn test_override_larger_than_target_is_infeasible() {
    let table = benchmark_table();
    let request = PacingRequest::new(600, CategoryTier::Open, Strategy::Weighted).with_roxzone(600);
    assert!(matches!(plan(&request, &table), Err(PacingError::InfeasibleTarget(_))));
  }

  #[test]
  fn test_pinned_pace_infeasible_for_both_strategies() {
    let table = benchmark_table();
    for strategy in [Strategy::Weighted, Strategy::BenchmarkFatigue] {
      // active = 3000 - 240 = 2760 <= 8 * 345
      let request = PacingRequest::new(3000, CategoryTier::Open, strategy).with_run_pace(345);
      assert!(matches!(plan(&request, &table), Err(PacingError::InfeasibleTarget(_))));
    }
  }

  #[test]
  fn test_meta_reports_strategy_and_benchmark_key() {
    let table = benchmark_table();
    let weighted = plan(&PacingRequest::new(5400, CategoryTier::DoublesPro, Strategy::Weighted), &table).unwrap();
    assert_eq!(weighted.meta.strategy, Strategy::Weighted);
    assert!(weighted.meta.benchmark_key.is_none());

    let request = PacingRequest::new(5400, CategoryTier::DoublesPro, Strategy::BenchmarkFatigue)
      .with_level(AthleteLevel::Recreational);
    let fatigue = plan(&request, &table).unwrap();
    assert_eq!(fatigue.meta.benchmark_key.as_deref(), Some("PRO"));
    assert_eq!(fatigue.meta.athlete_level, AthleteLevel::Recreational);
  }
}
