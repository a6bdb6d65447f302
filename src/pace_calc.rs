//! Pace / time / distance conversions for running and ergometers
//!
//! Running pace is per kilometre with distance in km. Erg pace is per 500 m
//! with distance in metres.

use serde::{Deserialize, Serialize};

use crate::error::PacingError;
use crate::time_codec::Seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Running,
    Erg,
}

impl Modality {
    /// Distance units per pace unit: 1 km for running, 500 m on an erg
    fn pace_unit(&self) -> f64 {
        match self {
            Modality::Running => 1.0,
            Modality::Erg => 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePace {
    pub run_per_km: &'static str,
    pub kmh: f64,
    pub row_per_500m: &'static str,
    pub ski_per_500m: &'static str,
}

/// Rough run pace equivalents on the rower and ski erg
pub static REFERENCE_PACES: [ReferencePace; 6] = [
    ReferencePace { run_per_km: "3:30", kmh: 17.1, row_per_500m: "1:45", ski_per_500m: "1:50" },
    ReferencePace { run_per_km: "4:00", kmh: 15.0, row_per_500m: "1:55", ski_per_500m: "2:00" },
    ReferencePace { run_per_km: "4:30", kmh: 13.3, row_per_500m: "2:05", ski_per_500m: "2:10" },
    ReferencePace { run_per_km: "5:00", kmh: 12.0, row_per_500m: "2:15", ski_per_500m: "2:20" },
    ReferencePace { run_per_km: "5:30", kmh: 10.9, row_per_500m: "2:25", ski_per_500m: "2:30" },
    ReferencePace { run_per_km: "6:00", kmh: 10.0, row_per_500m: "2:35", ski_per_500m: "2:40" },
];

fn check_positive(value: f64, what: &str) -> Result<f64, PacingError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PacingError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            what, value
        )))
    }
}

fn check_nonzero(seconds: Seconds, what: &str) -> Result<Seconds, PacingError> {
    if seconds == 0 {
        return Err(PacingError::InvalidInput(format!("{} must be greater than zero", what)));
    }
    Ok(seconds)
}

/// Pace per unit for covering `distance` in `time`
pub fn pace_for(modality: Modality, time: Seconds, distance: f64) -> Result<Seconds, PacingError> {
    let time = check_nonzero(time, "time")?;
    let distance = check_positive(distance, "distance")?;
    Ok((time as f64 / distance * modality.pace_unit()).floor() as Seconds)
}

/// Time to cover `distance` at `pace`
pub fn time_for(modality: Modality, distance: f64, pace: Seconds) -> Result<Seconds, PacingError> {
    let pace = check_nonzero(pace, "pace")?;
    let distance = check_positive(distance, "distance")?;
    Ok((distance / modality.pace_unit() * pace as f64).floor() as Seconds)
}

/// Distance covered in `time` at `pace`: km to two decimals, or whole metres
pub fn distance_for(modality: Modality, time: Seconds, pace: Seconds) -> Result<f64, PacingError> {
    let time = check_nonzero(time, "time")?;
    let pace = check_nonzero(pace, "pace")?;
    let distance = time as f64 / pace as f64 * modality.pace_unit();
    Ok(match modality {
        Modality::Running => (distance * 100.0).round() / 100.0,
        Modality::Erg => distance.round(),
    })
}

/// Running pace per km for a speed in km/h
pub fn speed_to_pace(kmh: f64) -> Result<Seconds, PacingError> {
    let kmh = check_positive(kmh, "speed")?;
    Ok((3600.0 / kmh).floor() as Seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_codec;

    #[test]
    fn test_running_pace() {
        // 10 km in 50:00 -> 5:00 /km
        assert_eq!(pace_for(Modality::Running, 3000, 10.0).unwrap(), 300);
        assert_eq!(time_for(Modality::Running, 21.1, 300).unwrap(), 6330);
        assert_eq!(distance_for(Modality::Running, 3600, 270).unwrap(), 13.33);
    }

    #[test]
    fn test_erg_pace() {
        // 1000 m in 3:50 -> 1:55 /500m
        assert_eq!(pace_for(Modality::Erg, 230, 1000.0).unwrap(), 115);
        assert_eq!(time_for(Modality::Erg, 2000.0, 120).unwrap(), 480);
        assert_eq!(distance_for(Modality::Erg, 600, 130).unwrap(), 2308.0);
    }

    #[test]
    fn test_speed_to_pace() {
        assert_eq!(speed_to_pace(15.0).unwrap(), 240);
        assert_eq!(speed_to_pace(12.0).unwrap(), 300);
        assert_eq!(
            speed_to_pace(0.0),
            Err(PacingError::InvalidInput("speed must be a positive number, got 0".into()))
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(pace_for(Modality::Running, 0, 5.0), Err(PacingError::InvalidInput(_))));
        assert!(matches!(pace_for(Modality::Running, 100, -1.0), Err(PacingError::InvalidInput(_))));
        assert!(matches!(time_for(Modality::Erg, f64::NAN, 120), Err(PacingError::InvalidInput(_))));
        assert!(matches!(distance_for(Modality::Erg, 600, 0), Err(PacingError::InvalidInput(_))));
    }

    #[test]
    fn test_reference_table_is_consistent() {
        for row in REFERENCE_PACES {
            let pace = time_codec::parse(row.run_per_km).unwrap();
            let from_speed = speed_to_pace(row.kmh).unwrap();
            assert!(pace.abs_diff(from_speed) <= 2, "{} vs {} km/h", row.run_per_km, row.kmh);
        }
    }
}
