use serde::{Deserialize, Serialize};

use crate::segments::{CategoryTier, SegmentKind};
use crate::time_codec::{self, Seconds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum AthleteLevel {
  Recreational,
  #[default]
  Competitive,
  Elite,
}

impl std::fmt::Display for AthleteLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Recreational => write!(f, "recreational"),
      Self::Competitive => write!(f, "competitive"),
      Self::Elite => write!(f, "elite"),
    }
  }
}

impl std::str::FromStr for AthleteLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "recreational" | "recreativo" => Ok(Self::Recreational),
      "competitive" | "competitivo" => Ok(Self::Competitive),
      "elite" => Ok(Self::Elite),
      _ => Err(format!("Unknown athlete level: {}", s)),
    }
  }
}

/// Which allocation model to run. Callers choose explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  /// Proportional split over static segment weights
  Weighted,
  /// Benchmark scaling with compounding fatigue, floors and reconciliation
  BenchmarkFatigue,
}

impl std::fmt::Display for Strategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Weighted => write!(f, "weighted"),
      Self::BenchmarkFatigue => write!(f, "benchmark_fatigue"),
    }
  }
}

impl std::str::FromStr for Strategy {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "weighted" => Ok(Self::Weighted),
      "benchmark_fatigue" => Ok(Self::BenchmarkFatigue),
      _ => Err(format!("Unknown pacing strategy: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Request
/// ---------------------------------------------------------------------------

/// A fully parsed pacing request. Durations are already validated seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingRequest {
  pub target_total: Seconds,
  pub category: CategoryTier,
  /// Set when the requested category name was not recognised and
  /// `category` holds the fallback tier
  #[serde(default)]
  pub category_fallback: bool,
  pub preferred_run_pace: Option<Seconds>,
  pub roxzone_override: Option<Seconds>,
  #[serde(default)]
  pub athlete_level: AthleteLevel,
  #[serde(default)]
  pub elite: bool,
  pub strategy: Strategy,
}

impl PacingRequest {
  pub fn new(target_total: Seconds, category: CategoryTier, strategy: Strategy) -> Self {
    Self {
      target_total,
      category,
      category_fallback: false,
      preferred_run_pace: None,
      roxzone_override: None,
      athlete_level: AthleteLevel::default(),
      elite: false,
      strategy,
    }
  }

  pub fn with_run_pace(mut self, pace: Seconds) -> Self {
    self.preferred_run_pace = Some(pace);
    self
  }

  pub fn with_roxzone(mut self, seconds: Seconds) -> Self {
    self.roxzone_override = Some(seconds);
    self
  }

  pub fn with_level(mut self, level: AthleteLevel) -> Self {
    self.athlete_level = level;
    self
  }

  /// Elite athletes bypass station floors, either by level or by flag
  pub fn bypasses_floors(&self) -> bool {
    self.elite || self.athlete_level == AthleteLevel::Elite
  }
}

/// ---------------------------------------------------------------------------
/// Result
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentResult {
  pub name: String,
  pub kind: SegmentKind,
  pub seconds: Seconds,
  pub formatted: String,
  /// Split per 500 m, erg stations only
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pace_per_500m: Option<Seconds>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pace_per_500m_formatted: Option<String>,
}

impl SegmentResult {
  pub fn new(name: &str, kind: SegmentKind, seconds: Seconds) -> Self {
    Self {
      name: name.to_string(),
      kind,
      seconds,
      formatted: time_codec::format(seconds),
      pace_per_500m: None,
      pace_per_500m_formatted: None,
    }
  }

  pub fn set_seconds(&mut self, seconds: Seconds) {
    self.seconds = seconds;
    self.formatted = time_codec::format(seconds);
  }

  pub fn set_pace_per_500m(&mut self, pace: Seconds) {
    self.pace_per_500m = Some(pace);
    self.pace_per_500m_formatted = Some(time_codec::format(pace));
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingMeta {
  pub strategy: Strategy,
  pub athlete_level: AthleteLevel,
  pub category: CategoryTier,
  pub category_fallback: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub benchmark_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingResult {
  pub target_time: String,
  pub target_seconds: Seconds,
  pub roxzone_seconds: Seconds,
  pub roxzone_formatted: String,
  pub segments: Vec<SegmentResult>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
  pub meta: PacingMeta,
}

impl PacingResult {
  /// Segments plus transition budget
  pub fn total_seconds(&self) -> i64 {
    self.segments.iter().map(|s| s.seconds as i64).sum::<i64>() + self.roxzone_seconds as i64
  }

  /// Target minus allocated total; zero for every exact plan
  pub fn residual_seconds(&self) -> i64 {
    self.target_seconds as i64 - self.total_seconds()
  }

  pub fn runs(&self) -> impl Iterator<Item = &SegmentResult> {
    self.segments.iter().filter(|s| s.kind == SegmentKind::Run)
  }

  pub fn exercises(&self) -> impl Iterator<Item = &SegmentResult> {
    self.segments.iter().filter(|s| s.kind == SegmentKind::Exercise)
  }
}
