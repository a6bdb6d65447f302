//! The fixed race layout and category tiers
//!
//! Eight 1 km run legs interleaved with eight stations, run first. Order is
//! significant: results always come back in table order.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
/// Segment kinds and station keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Run,
    Exercise,
}

/// Key used to look a station up in the benchmark table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkKey {
    Ski,
    SledPush,
    SledPull,
    Burpees,
    Row,
    FarmersCarry,
    Lunges,
    WallBalls,
}

impl BenchmarkKey {
    pub const ALL: [BenchmarkKey; 8] = [
        BenchmarkKey::Ski,
        BenchmarkKey::SledPush,
        BenchmarkKey::SledPull,
        BenchmarkKey::Burpees,
        BenchmarkKey::Row,
        BenchmarkKey::FarmersCarry,
        BenchmarkKey::Lunges,
        BenchmarkKey::WallBalls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkKey::Ski => "ski",
            BenchmarkKey::SledPush => "sled_push",
            BenchmarkKey::SledPull => "sled_pull",
            BenchmarkKey::Burpees => "burpees",
            BenchmarkKey::Row => "row",
            BenchmarkKey::FarmersCarry => "farmers_carry",
            BenchmarkKey::Lunges => "lunges",
            BenchmarkKey::WallBalls => "wall_balls",
        }
    }

    /// Position in race order, 0-based
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Ergometer stations (1000 m on the ski erg or rower)
    pub fn is_erg(&self) -> bool {
        matches!(self, BenchmarkKey::Ski | BenchmarkKey::Row)
    }

    /// Hard minimum for capped stations, bypassed for elite athletes.
    pub fn floor_seconds(&self) -> Option<u32> {
        match self {
            BenchmarkKey::Ski => Some(170),
            BenchmarkKey::Burpees => Some(190),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
/// Segment table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub name: &'static str,
    pub kind: SegmentKind,
    pub benchmark_key: Option<BenchmarkKey>,
    pub static_weight: f64,
}

const fn run(name: &'static str, static_weight: f64) -> Segment {
    Segment {
        name,
        kind: SegmentKind::Run,
        benchmark_key: None,
        static_weight,
    }
}

const fn station(name: &'static str, key: BenchmarkKey, static_weight: f64) -> Segment {
    Segment {
        name,
        kind: SegmentKind::Exercise,
        benchmark_key: Some(key),
        static_weight,
    }
}

pub const RUN_COUNT: usize = 8;
pub const STATION_COUNT: usize = 8;

pub const SEGMENT_TABLE: [Segment; RUN_COUNT + STATION_COUNT] = [
    run("Run 1 (1km)", 0.90),
    station("Ski Erg (1000m)", BenchmarkKey::Ski, 1.0),
    run("Run 2 (1km)", 0.92),
    station("Sled Push (50m)", BenchmarkKey::SledPush, 0.9),
    run("Run 3 (1km)", 0.95),
    station("Sled Pull (50m)", BenchmarkKey::SledPull, 1.1),
    run("Run 4 (1km)", 1.05),
    station("Burpee Broad Jumps (80m)", BenchmarkKey::Burpees, 1.25),
    run("Run 5 (1km)", 1.05),
    station("Rowing (1000m)", BenchmarkKey::Row, 1.1),
    run("Run 6 (1km)", 1.05),
    station("Farmers Carry (200m)", BenchmarkKey::FarmersCarry, 0.7),
    run("Run 7 (1km)", 1.1),
    station("Sandbag Lunges (100m)", BenchmarkKey::Lunges, 1.4),
    run("Run 8 (1km)", 1.2),
    station("Wall Balls (75/100)", BenchmarkKey::WallBalls, 1.1),
];

// ---------------------------------------------------------------------------
/// Category tiers
// ---------------------------------------------------------------------------

const PRO_EXERCISE_FACTOR: f64 = 1.15;
const DOUBLES_EXERCISE_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryTier {
    Open,
    Pro,
    Doubles,
    SingleOpen,
    SinglePro,
    DoublesMen,
    DoublesWomen,
    DoublesPro,
}

impl CategoryTier {
    pub const ALL: [CategoryTier; 8] = [
        CategoryTier::Open,
        CategoryTier::Pro,
        CategoryTier::Doubles,
        CategoryTier::SingleOpen,
        CategoryTier::SinglePro,
        CategoryTier::DoublesMen,
        CategoryTier::DoublesWomen,
        CategoryTier::DoublesPro,
    ];

    /// Tier used when a category name is not recognised
    pub const FALLBACK: CategoryTier = CategoryTier::SingleOpen;

    pub fn label(&self) -> &'static str {
        match self {
            CategoryTier::Open => "Open",
            CategoryTier::Pro => "Pro",
            CategoryTier::Doubles => "Doubles",
            CategoryTier::SingleOpen => "Single Open",
            CategoryTier::SinglePro => "Single Pro",
            CategoryTier::DoublesMen => "Doubles Men",
            CategoryTier::DoublesWomen => "Doubles Women",
            CategoryTier::DoublesPro => "Doubles Pro",
        }
    }

    /// Resolve a display name. Returns the tier and whether it fell back.
    pub fn resolve(name: &str) -> (CategoryTier, bool) {
        let normalized = name.split_whitespace().collect::<Vec<_>>().join(" ");
        match Self::ALL
            .iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(&normalized))
        {
            Some(tier) => (*tier, false),
            None => (Self::FALLBACK, true),
        }
    }

    pub fn is_pro(&self) -> bool {
        matches!(
            self,
            CategoryTier::Pro | CategoryTier::SinglePro | CategoryTier::DoublesPro
        )
    }

    pub fn is_doubles(&self) -> bool {
        matches!(
            self,
            CategoryTier::Doubles
                | CategoryTier::DoublesMen
                | CategoryTier::DoublesWomen
                | CategoryTier::DoublesPro
        )
    }

    /// Multiplier applied to every station weight. Pro and doubles compose.
    pub fn exercise_factor(&self) -> f64 {
        let mut factor = 1.0;
        if self.is_pro() {
            factor *= PRO_EXERCISE_FACTOR;
        }
        if self.is_doubles() {
            factor *= DOUBLES_EXERCISE_FACTOR;
        }
        factor
    }

    /// Benchmark tier key. Doubles pro resolves to the pro row.
    pub fn benchmark_key(&self) -> &'static str {
        if self.is_pro() {
            "PRO"
        } else if self.is_doubles() {
            "DOUBLES"
        } else {
            "OPEN"
        }
    }
}

impl std::fmt::Display for CategoryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Static weights for a tier, in table order. The shared table is never touched.
pub fn adjusted_weights(tier: CategoryTier) -> [f64; RUN_COUNT + STATION_COUNT] {
    let factor = tier.exercise_factor();
    SEGMENT_TABLE.map(|segment| match segment.kind {
        SegmentKind::Run => segment.static_weight,
        SegmentKind::Exercise => segment.static_weight * factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_key_index_follows_race_order() {
        for (i, key) in BenchmarkKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_table_alternates_run_first() {
        assert_eq!(SEGMENT_TABLE.len(), 16);
        for (i, segment) in SEGMENT_TABLE.iter().enumerate() {
            let expected = if i % 2 == 0 {
                SegmentKind::Run
            } else {
                SegmentKind::Exercise
            };
            assert_eq!(segment.kind, expected, "segment {} ({})", i, segment.name);
            assert_eq!(segment.benchmark_key.is_some(), expected == SegmentKind::Exercise);
        }
    }

    #[test]
    fn test_station_keys_in_order() {
        let keys: Vec<BenchmarkKey> = SEGMENT_TABLE
            .iter()
            .filter_map(|s| s.benchmark_key)
            .collect();
        assert_eq!(keys, BenchmarkKey::ALL.to_vec());
    }

    #[test]
    fn test_resolve_category() {
        assert_eq!(CategoryTier::resolve("Open"), (CategoryTier::Open, false));
        assert_eq!(CategoryTier::resolve("single  open"), (CategoryTier::SingleOpen, false));
        assert_eq!(CategoryTier::resolve("DOUBLES PRO"), (CategoryTier::DoublesPro, false));
        assert_eq!(CategoryTier::resolve("Relay"), (CategoryTier::SingleOpen, true));
        assert_eq!(CategoryTier::resolve(""), (CategoryTier::SingleOpen, true));
    }

    #[test]
    fn test_benchmark_key_resolution() {
        assert_eq!(CategoryTier::Open.benchmark_key(), "OPEN");
        assert_eq!(CategoryTier::SinglePro.benchmark_key(), "PRO");
        assert_eq!(CategoryTier::DoublesWomen.benchmark_key(), "DOUBLES");
        assert_eq!(CategoryTier::DoublesPro.benchmark_key(), "PRO");
    }

    #[test]
    fn test_adjusted_weights_scale_only_stations() {
        let open = adjusted_weights(CategoryTier::Open);
        let pro = adjusted_weights(CategoryTier::SinglePro);
        let doubles_pro = adjusted_weights(CategoryTier::DoublesPro);

        for (i, segment) in SEGMENT_TABLE.iter().enumerate() {
            match segment.kind {
                SegmentKind::Run => {
                    assert_eq!(pro[i], open[i]);
                    assert_eq!(doubles_pro[i], open[i]);
                }
                SegmentKind::Exercise => {
                    assert!((pro[i] - open[i] * 1.15).abs() < 1e-9);
                    assert!((doubles_pro[i] - open[i] * 1.15 * 0.85).abs() < 1e-9);
                }
            }
        }
        // Table itself is untouched
        assert_eq!(SEGMENT_TABLE[1].static_weight, 1.0);
    }

    #[test]
    fn test_floors() {
        assert_eq!(BenchmarkKey::Ski.floor_seconds(), Some(170));
        assert_eq!(BenchmarkKey::Burpees.floor_seconds(), Some(190));
        assert_eq!(BenchmarkKey::Row.floor_seconds(), None);
    }
}
