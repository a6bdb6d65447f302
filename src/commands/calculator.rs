//! Pace calculator commands

use serde::{Deserialize, Serialize};

use crate::error::PacingError;
use crate::pace_calc::{self, Modality, ReferencePace, REFERENCE_PACES};
use crate::time_codec::{self, Seconds};

/// What to solve for, given the other two quantities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum PaceQuery {
  Pace { modality: Modality, time: String, distance: f64 },
  Time { modality: Modality, distance: f64, pace: String },
  Distance { modality: Modality, time: String, pace: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaceAnswer {
  Duration { seconds: Seconds, formatted: String },
  Distance { value: f64, unit: String },
}

impl PaceAnswer {
  fn duration(seconds: Seconds) -> Self {
    PaceAnswer::Duration {
      seconds,
      formatted: time_codec::format(seconds),
    }
  }
}

pub fn convert_pace(query: PaceQuery) -> Result<PaceAnswer, PacingError> {
  match query {
    PaceQuery::Pace { modality, time, distance } => {
      let time = time_codec::parse(&time)?;
      Ok(PaceAnswer::duration(pace_calc::pace_for(modality, time, distance)?))
    }
    PaceQuery::Time { modality, distance, pace } => {
      let pace = time_codec::parse(&pace)?;
      Ok(PaceAnswer::duration(pace_calc::time_for(modality, distance, pace)?))
    }
    PaceQuery::Distance { modality, time, pace } => {
      let value = pace_calc::distance_for(modality, time_codec::parse(&time)?, time_codec::parse(&pace)?)?;
      let unit = match modality {
        Modality::Running => "km",
        Modality::Erg => "m",
      };
      Ok(PaceAnswer::Distance {
        value,
        unit: unit.to_string(),
      })
    }
  }
}

/// Running pace per km for a treadmill speed in km/h
pub fn pace_from_speed(kmh: f64) -> Result<PaceAnswer, PacingError> {
  Ok(PaceAnswer::duration(pace_calc::speed_to_pace(kmh)?))
}

pub fn reference_paces() -> &'static [ReferencePace] {
  &REFERENCE_PACES
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_convert_pace_queries() {
    let answer = convert_pace(PaceQuery::Pace {
      modality: Modality::Running,
      time: "50:00".into(),
      distance: 10.0,
    })
    .unwrap();
    assert_eq!(answer, PaceAnswer::Duration { seconds: 300, formatted: "00:05:00".into() });

    let answer = convert_pace(PaceQuery::Distance {
      modality: Modality::Erg,
      time: "04:00".into(),
      pace: "02:00".into(),
    })
    .unwrap();
    assert_eq!(answer, PaceAnswer::Distance { value: 1000.0, unit: "m".into() });
  }

  #[test]
  fn test_query_from_json() {
    let json = r#"{"solve_for": "time", "modality": "erg", "distance": 1000, "pace": "1:55"}"#;
    let query: PaceQuery = serde_json::from_str(json).unwrap();
    let answer = convert_pace(query).unwrap();
    assert_eq!(answer, PaceAnswer::Duration { seconds: 230, formatted: "00:03:50".into() });
  }

  #[test]
  fn test_bad_time_text_is_format_error() {
    let result = convert_pace(PaceQuery::Time {
      modality: Modality::Running,
      distance: 5.0,
      pace: "fast".into(),
    });
    assert!(matches!(result, Err(PacingError::Format(_))));
  }

  #[test]
  fn test_pace_from_speed_and_reference() {
    assert_eq!(
      pace_from_speed(10.0).unwrap(),
      PaceAnswer::Duration { seconds: 360, formatted: "00:06:00".into() }
    );
    assert_eq!(reference_paces().len(), 6);
  }
}
