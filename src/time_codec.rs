//! Conversion between `HH:MM:SS` / `MM:SS` text and whole seconds.

use crate::error::PacingError;

/// Whole seconds. All durations in the engine are non-negative.
pub type Seconds = u32;

/// Parse `HH:MM:SS` or `MM:SS` into seconds.
///
/// Every component must be plain ASCII digits. Signs, blanks, fractional
/// parts and any other arity are rejected rather than read as zero.
pub fn parse(text: &str) -> Result<Seconds, PacingError> {
  let trimmed = text.trim();
  let parts: Vec<&str> = trimmed.split(':').collect();

  let (h, m, s) = match parts.as_slice() {
    [h, m, s] => (component(h, text)?, component(m, text)?, component(s, text)?),
    [m, s] => (0, component(m, text)?, component(s, text)?),
    _ => {
      return Err(PacingError::Format(format!(
        "expected HH:MM:SS or MM:SS, got '{}'",
        text
      )))
    }
  };

  h.checked_mul(3600)
    .and_then(|hs| m.checked_mul(60).and_then(|ms| hs.checked_add(ms)))
    .and_then(|total| total.checked_add(s))
    .ok_or_else(|| PacingError::Format(format!("duration '{}' is too large", text)))
}

fn component(part: &str, original: &str) -> Result<Seconds, PacingError> {
  if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
    return Err(PacingError::Format(format!(
      "'{}' is not a valid time component in '{}'",
      part, original
    )));
  }
  part
    .parse::<Seconds>()
    .map_err(|_| PacingError::Format(format!("duration '{}' is too large", original)))
}

/// Format seconds as zero-padded `HH:MM:SS`.
pub fn format(seconds: Seconds) -> String {
  let h = seconds / 3600;
  let m = (seconds % 3600) / 60;
  let s = seconds % 60;
  format!("{:02}:{:02}:{:02}", h, m, s)
}
