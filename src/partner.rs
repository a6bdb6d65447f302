//! Doubles partner strategy
//!
//! In doubles both partners run every leg together but share the station
//! work. Given a pacing result and how each station's work is split, this
//! computes each athlete's station time and who should start each station.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PacingError;
use crate::models::PacingResult;
use crate::segments::SegmentKind;
use crate::time_codec::Seconds;

/// Share of a station done by athlete A, in percent. B does the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSplit {
  pub athlete_a: u8,
}

impl WorkSplit {
  pub const EVEN: WorkSplit = WorkSplit { athlete_a: 50 };

  pub fn new(athlete_a: u8) -> Result<Self, PacingError> {
    if athlete_a > 100 {
      return Err(PacingError::InvalidInput(format!(
        "work split must be 0-100%, got {}%",
        athlete_a
      )));
    }
    Ok(Self { athlete_a })
  }

  pub fn athlete_b(&self) -> u8 {
    100 - self.athlete_a
  }
}

impl Default for WorkSplit {
  fn default() -> Self {
    Self::EVEN
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteNames {
  pub a: String,
  pub b: String,
}

impl Default for AthleteNames {
  fn default() -> Self {
    Self {
      a: "Athlete A".to_string(),
      b: "Athlete B".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationShare {
  pub name: String,
  pub seconds: Seconds,
  pub split: WorkSplit,
  pub athlete_a_seconds: Seconds,
  pub athlete_b_seconds: Seconds,
  pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerPlan {
  pub names: AthleteNames,
  pub stations: Vec<StationShare>,
  /// Share of total station time, rounded
  pub athlete_a_percent: u32,
  pub athlete_b_percent: u32,
  pub athlete_a_seconds: Seconds,
  pub athlete_b_seconds: Seconds,
}

impl PartnerPlan {
  /// Stations without an entry in `splits` are shared evenly.
  pub fn build(
    result: &PacingResult,
    splits: &HashMap<String, WorkSplit>,
    names: AthleteNames,
  ) -> Result<Self, PacingError> {
    for (name, split) in splits {
      WorkSplit::new(split.athlete_a)?;
      if !result.exercises().any(|s| &s.name == name) {
        return Err(PacingError::InvalidInput(format!("'{}' is not a station in this plan", name)));
      }
    }

    let stations: Vec<StationShare> = result
      .segments
      .iter()
      .filter(|s| s.kind == SegmentKind::Exercise)
      .map(|segment| {
        let split = splits.get(&segment.name).copied().unwrap_or_default();
        let athlete_a_seconds =
          (segment.seconds as f64 * split.athlete_a as f64 / 100.0).round() as Seconds;
        StationShare {
          name: segment.name.clone(),
          seconds: segment.seconds,
          split,
          athlete_a_seconds,
          athlete_b_seconds: segment.seconds - athlete_a_seconds,
          recommendation: recommendation(split, &names),
        }
      })
      .collect();

    let athlete_a_seconds: Seconds = stations.iter().map(|s| s.athlete_a_seconds).sum();
    let athlete_b_seconds: Seconds = stations.iter().map(|s| s.athlete_b_seconds).sum();
    let total = athlete_a_seconds + athlete_b_seconds;

    let (athlete_a_percent, athlete_b_percent) = if total == 0 {
      (50, 50)
    } else {
      (
        (athlete_a_seconds as f64 / total as f64 * 100.0).round() as u32,
        (athlete_b_seconds as f64 / total as f64 * 100.0).round() as u32,
      )
    };

    Ok(Self {
      names,
      stations,
      athlete_a_percent,
      athlete_b_percent,
      athlete_a_seconds,
      athlete_b_seconds,
    })
  }
}

/// The athlete doing more of the work starts the station
fn recommendation(split: WorkSplit, names: &AthleteNames) -> String {
  match split.athlete_a {
    a if a > 50 => format!("{} starts ({}%)", names.a, a),
    a if a < 50 => format!("{} starts ({}%)", names.b, split.athlete_b()),
    _ => "Equal Split - Alternate".to_string(),
  }
}
