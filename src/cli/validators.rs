//! CLI argument validators.

use crate::constants::MAX_HIGHLIGHT_DURATION;

/// Parse and validate a highlight duration in whole seconds.
pub fn parse_duration(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number of seconds"))?;

    if !(1..=MAX_HIGHLIGHT_DURATION).contains(&value) {
        return Err(format!(
            "duration must be between 1 and {MAX_HIGHLIGHT_DURATION} seconds, got {value}"
        ));
    }

    Ok(value)
}
