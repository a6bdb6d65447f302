pub mod calculator;
pub mod pacing;

pub use calculator::{convert_pace, pace_from_speed, reference_paces, PaceAnswer, PaceQuery};
pub use pacing::{calculate_pacer, calculate_pacer_batch, plan_partner_split, PacerRequest};
