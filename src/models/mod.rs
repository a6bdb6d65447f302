pub mod pacing;

pub use pacing::{AthleteLevel, PacingMeta, PacingRequest, PacingResult, SegmentResult, Strategy};
