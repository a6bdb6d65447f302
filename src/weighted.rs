//! Weighted distribution strategy
//!
//! Splits the active budget in proportion to each segment's static weight.
//! With a preferred run pace, every run leg is pinned to that pace and only
//! the stations share what is left, each keeping at least one second. The
//! last segment in table order takes the rounding remainder so the allocation
//! always sums to the active budget.

use tracing::warn;

use crate::engine::{exercise_budget, Allocation, MIN_STATION_SECONDS};
use crate::error::PacingError;
use crate::models::SegmentResult;
use crate::segments::{adjusted_weights, CategoryTier, SegmentKind, SEGMENT_TABLE, STATION_COUNT};
use crate::time_codec::{self, Seconds};

/// Below this many seconds for all eight stations the plan is flagged as very intense
pub const REALISM_FLOOR_SECONDS: Seconds = 20 * 60;

pub fn allocate(
  category: CategoryTier,
  active_budget: Seconds,
  run_pace: Option<Seconds>,
) -> Result<Allocation, PacingError> {
  let weights = adjusted_weights(category);

  match run_pace {
    None => {
      let total_weight: f64 = weights.iter().sum();
      let seconds_per_unit = active_budget as f64 / total_weight;
      let segments = fill(active_budget, |i| {
        (weights[i] * seconds_per_unit).floor() as Seconds
      });
      Ok(Allocation {
        segments,
        warning: None,
        benchmark_key: None,
      })
    }
    Some(pace) => {
      let remaining = exercise_budget(active_budget, pace)?;
      let reserved = MIN_STATION_SECONDS * STATION_COUNT as Seconds;
      if remaining < reserved {
        return Err(PacingError::InfeasibleTarget(format!(
          "only {}s left for {} stations at {} per km. Reduce run pace or increase target time.",
          remaining,
          STATION_COUNT,
          time_codec::format(pace)
        )));
      }

      let warning = if remaining < REALISM_FLOOR_SECONDS {
        warn!(remaining, "Very little time left for stations");
        Some(format!(
          "Warning: High Intensity! Only {} remaining for exercises.",
          time_codec::format(remaining)
        ))
      } else {
        None
      };

      let exercise_weight: f64 = SEGMENT_TABLE
        .iter()
        .zip(weights.iter())
        .filter(|(segment, _)| segment.kind == SegmentKind::Exercise)
        .map(|(_, w)| w)
        .sum();
      // Every station keeps its minimum; only the rest is split by weight
      let seconds_per_unit = (remaining - reserved) as f64 / exercise_weight;

      let segments = fill(active_budget, |i| match SEGMENT_TABLE[i].kind {
        SegmentKind::Run => pace,
        SegmentKind::Exercise => MIN_STATION_SECONDS + (weights[i] * seconds_per_unit).floor() as Seconds,
      });
      Ok(Allocation {
        segments,
        warning,
        benchmark_key: None,
      })
    }
  }
}

/// Build results in table order; the final segment absorbs the remainder.
fn fill(active_budget: Seconds, seconds_for: impl Fn(usize) -> Seconds) -> Vec<SegmentResult> {
  let last = SEGMENT_TABLE.len() - 1;
  let mut current_sum: Seconds = 0;

  SEGMENT_TABLE
    .iter()
    .enumerate()
    .map(|(i, segment)| {
      let seconds = if i == last {
        active_budget.saturating_sub(current_sum)
      } else {
        seconds_for(i)
      };
      current_sum += seconds;
      SegmentResult::new(segment.name, segment.kind, seconds)
    })
    .collect()
}
