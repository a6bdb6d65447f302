//! Pacing commands: the structured request/response boundary
//!
//! Callers (an HTTP handler, a desktop shell, a CLI) hand over text durations
//! and tags; everything is parsed here before a strategy runs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::config::PacerConfig;
use crate::engine;
use crate::error::PacingError;
use crate::models::{AthleteLevel, PacingRequest, PacingResult, Strategy};
use crate::partner::{AthleteNames, PartnerPlan, WorkSplit};
use crate::segments::CategoryTier;
use crate::time_codec::{self, Seconds};
use crate::PacerState;

/// ---------------------------------------------------------------------------
/// Request DTO
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacerRequest {
  /// Target finish time, `HH:MM:SS` or `MM:SS`
  pub target_time: String,
  /// Category display name, e.g. "Single Open" or "Doubles Pro"
  pub category: String,
  /// Pace per 1 km run leg
  #[serde(default)]
  pub preferred_run_pace: Option<String>,
  /// Transition budget override in minutes
  #[serde(default)]
  pub roxzone_minutes: Option<f64>,
  #[serde(default)]
  pub is_elite: bool,
  #[serde(default)]
  pub athlete_level: Option<String>,
  #[serde(default)]
  pub strategy: Option<Strategy>,
}

impl PacerRequest {
  /// Parse and validate into an engine request. Duration errors surface first.
  pub fn into_request(self, config: &PacerConfig) -> Result<PacingRequest, PacingError> {
    let target_total = time_codec::parse(&self.target_time)?;
    let preferred_run_pace = self
      .preferred_run_pace
      .as_deref()
      .map(str::trim)
      .filter(|p| !p.is_empty())
      .map(time_codec::parse)
      .transpose()?;

    if preferred_run_pace == Some(0) {
      return Err(PacingError::InvalidInput("preferred run pace must be greater than zero".into()));
    }

    let roxzone_override = self.roxzone_minutes.map(minutes_to_seconds).transpose()?;

    let athlete_level = match self.athlete_level.as_deref() {
      Some(level) => level.parse::<AthleteLevel>().map_err(PacingError::InvalidInput)?,
      None => AthleteLevel::default(),
    };

    let (category, category_fallback) = CategoryTier::resolve(&self.category);

    Ok(PacingRequest {
      target_total,
      category,
      category_fallback,
      preferred_run_pace,
      roxzone_override,
      athlete_level,
      elite: self.is_elite || athlete_level == AthleteLevel::Elite,
      strategy: self.strategy.unwrap_or(config.default_strategy),
    })
  }
}

/// Whole seconds, truncated
fn minutes_to_seconds(minutes: f64) -> Result<Seconds, PacingError> {
  if !minutes.is_finite() || minutes < 0.0 {
    return Err(PacingError::InvalidInput(format!(
      "transition minutes must be a non-negative number, got {}",
      minutes
    )));
  }
  Ok((minutes * 60.0) as Seconds)
}

/// ---------------------------------------------------------------------------
/// Commands
/// ---------------------------------------------------------------------------

pub fn calculate_pacer(state: &PacerState, request: PacerRequest) -> Result<PacingResult, PacingError> {
  let request = request.into_request(&state.config)?;
  let benchmarks = state.benchmarks.snapshot();
  engine::plan(&request, &benchmarks)
}

/// Plan every request in parallel against one benchmark snapshot.
/// Results keep input order; one bad request does not affect the others.
pub fn calculate_pacer_batch(
  state: &PacerState,
  requests: Vec<PacerRequest>,
) -> Vec<Result<PacingResult, PacingError>> {
  let benchmarks = state.benchmarks.snapshot();
  let config = &state.config;

  let results: Vec<Result<PacingResult, PacingError>> = requests
    .into_par_iter()
    .map(|request| {
      let request = request.into_request(config)?;
      engine::plan(&request, &benchmarks)
    })
    .collect();

  info!(
    total = results.len(),
    failed = results.iter().filter(|r| r.is_err()).count(),
    "Batch pacing complete"
  );
  results
}

/// Split each station between doubles partners. `splits` maps station
/// name to athlete A's share in percent.
pub fn plan_partner_split(
  result: &PacingResult,
  splits: HashMap<String, u8>,
  names: Option<AthleteNames>,
) -> Result<PartnerPlan, PacingError> {
  if !result.meta.category.is_doubles() {
    return Err(PacingError::InvalidInput(format!(
      "partner split needs a doubles category, got {}",
      result.meta.category
    )));
  }

  let splits = splits
    .into_iter()
    .map(|(name, percent)| Ok((name, WorkSplit::new(percent)?)))
    .collect::<Result<HashMap<_, _>, PacingError>>()?;

  PartnerPlan::build(result, &splits, names.unwrap_or_default())
}
