//! Benchmark reference data
//!
//! Reference station times per benchmark tier, read once at startup and shared
//! read-only. A reload builds a complete new table and swaps it in atomically;
//! readers holding the previous snapshot keep a consistent view.

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::PacingError;
use crate::segments::{BenchmarkKey, STATION_COUNT};
use crate::time_codec::Seconds;

/// ---------------------------------------------------------------------------
/// Defaults
/// ---------------------------------------------------------------------------

/// Row used when a tier key is missing from the table
pub const DEFAULT_TIER: &str = "OPEN";

/// Value used when a station (or the run base) is missing from a row
pub const DEFAULT_STATION_SECONDS: Seconds = 300;

const EMBEDDED_BENCHMARKS: &str = include_str!("../data/benchmarks.json");

/// ---------------------------------------------------------------------------
/// Benchmark rows
/// ---------------------------------------------------------------------------

/// Row as it appears in the JSON resource
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBenchmarkRow {
  run_base: Option<Seconds>,
  ski: Option<Seconds>,
  sled_push: Option<Seconds>,
  sled_pull: Option<Seconds>,
  burpees: Option<Seconds>,
  row: Option<Seconds>,
  farmers_carry: Option<Seconds>,
  lunges: Option<Seconds>,
  wall_balls: Option<Seconds>,
}

impl RawBenchmarkRow {
  fn station(&self, key: BenchmarkKey) -> Option<Seconds> {
    match key {
      BenchmarkKey::Ski => self.ski,
      BenchmarkKey::SledPush => self.sled_push,
      BenchmarkKey::SledPull => self.sled_pull,
      BenchmarkKey::Burpees => self.burpees,
      BenchmarkKey::Row => self.row,
      BenchmarkKey::FarmersCarry => self.farmers_carry,
      BenchmarkKey::Lunges => self.lunges,
      BenchmarkKey::WallBalls => self.wall_balls,
    }
  }
}

/// Reference times for one tier, with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkRow {
  pub run_base: Seconds,
  /// Indexed by `BenchmarkKey::index`
  stations: [Seconds; STATION_COUNT],
}

impl BenchmarkRow {
  fn from_raw(tier: &str, raw: &RawBenchmarkRow) -> Result<Self, PacingError> {
    let run_base = checked_value(tier, "run_base", raw.run_base)?;
    let mut stations = [DEFAULT_STATION_SECONDS; STATION_COUNT];
    for key in BenchmarkKey::ALL {
      stations[key.index()] = checked_value(tier, key.as_str(), raw.station(key))?;
    }
    Ok(Self { run_base, stations })
  }

  pub fn station(&self, key: BenchmarkKey) -> Seconds {
    self.stations[key.index()]
  }
}

fn checked_value(tier: &str, field: &str, value: Option<Seconds>) -> Result<Seconds, PacingError> {
  match value {
    Some(0) => Err(PacingError::Configuration(format!(
      "benchmark {}.{} must be greater than zero",
      tier, field
    ))),
    Some(v) => Ok(v),
    None => Ok(DEFAULT_STATION_SECONDS),
  }
}

/// ---------------------------------------------------------------------------
/// Benchmark table
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkTable {
  rows: HashMap<String, BenchmarkRow>,
  default_row: BenchmarkRow,
}

impl BenchmarkTable {
  /// Parse the JSON resource: tier key -> { run_base, ski, sled_push, ... }
  pub fn from_json(json: &str) -> Result<Self, PacingError> {
    let raw: HashMap<String, RawBenchmarkRow> = serde_json::from_str(json)?;

    let rows = raw
      .iter()
      .map(|(tier, row)| Ok((tier.clone(), BenchmarkRow::from_raw(tier, row)?)))
      .collect::<Result<HashMap<_, _>, PacingError>>()?;

    let default_row = rows.get(DEFAULT_TIER).cloned().ok_or_else(|| {
      PacingError::Configuration(format!(
        "benchmark data must define the {} tier",
        DEFAULT_TIER
      ))
    })?;

    Ok(Self { rows, default_row })
  }

  /// Table compiled into the binary
  pub fn embedded() -> Result<Self, PacingError> {
    Self::from_json(EMBEDDED_BENCHMARKS)
  }

  /// Read a table from disk. The file is closed before parsing starts.
  pub fn from_path(path: &Path) -> Result<Self, PacingError> {
    let contents = fs::read_to_string(path).map_err(|e| {
      PacingError::Configuration(format!(
        "Failed to read benchmark file {}: {}",
        path.display(),
        e
      ))
    })?;
    Self::from_json(&contents)
  }

  /// Look up a tier row, falling back to the default tier.
  /// Returns the row and the key that was actually used.
  pub fn row<'a>(&'a self, tier: &'a str) -> (&'a BenchmarkRow, &'a str) {
    if let Some(row) = self.rows.get(tier) {
      return (row, tier);
    }
    warn!(tier, fallback = DEFAULT_TIER, "Benchmark tier missing, using default");
    (&self.default_row, DEFAULT_TIER)
  }

  pub fn tiers(&self) -> impl Iterator<Item = &str> {
    self.rows.keys().map(String::as_str)
  }
}

/// ---------------------------------------------------------------------------
/// Process-wide store
/// ---------------------------------------------------------------------------

/// Holds the current table. Readers never block; replacement is atomic.
pub struct BenchmarkStore {
  current: ArcSwap<BenchmarkTable>,
}

impl BenchmarkStore {
  pub fn new(table: BenchmarkTable) -> Self {
    Self {
      current: ArcSwap::from_pointee(table),
    }
  }

  /// Load from `path` if given, otherwise the embedded table
  pub fn load(path: Option<&Path>) -> Result<Self, PacingError> {
    let table = match path {
      Some(p) => BenchmarkTable::from_path(p)?,
      None => BenchmarkTable::embedded()?,
    };
    info!(
      source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".into()),
      tiers = table.rows.len(),
      "Benchmark data loaded"
    );
    Ok(Self::new(table))
  }

  pub fn snapshot(&self) -> Arc<BenchmarkTable> {
    self.current.load_full()
  }

  pub fn replace(&self, table: BenchmarkTable) {
    self.current.store(Arc::new(table));
    info!("Benchmark data replaced");
  }

  /// Re-read a file and swap it in. On error the current table stays active.
  pub fn reload_from(&self, path: &Path) -> Result<(), PacingError> {
    let table = BenchmarkTable::from_path(path)?;
    self.replace(table);
    Ok(())
  }
}
