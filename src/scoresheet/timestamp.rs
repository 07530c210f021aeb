//! Event timestamp parsing.

use chrono::{NaiveTime, Timelike};

use crate::constants::EVENT_TIME_FORMAT;

/// Parse a strict `HH:MM:SS` timestamp into elapsed seconds.
///
/// Returns `None` for anything that is not a valid time of day,
/// including fractional seconds and trailing text.
pub fn parse_timestamp(value: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(value, EVENT_TIME_FORMAT).ok()?;
    Some(time.hour() * 3600 + time.minute() * 60 + time.second())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_valid() {
        assert_eq!(parse_timestamp("00:00:00"), Some(0));
        assert_eq!(parse_timestamp("00:00:20"), Some(20));
        assert_eq!(parse_timestamp("00:01:00"), Some(60));
        assert_eq!(parse_timestamp("01:02:03"), Some(3723));
        assert_eq!(parse_timestamp("23:59:59"), Some(86_399));
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("12:30"), None);
        assert_eq!(parse_timestamp("00:61:00"), None);
        assert_eq!(parse_timestamp("24:00:00"), None);
        assert_eq!(parse_timestamp("aa:bb:cc"), None);
        assert_eq!(parse_timestamp("00:00:10.5"), None);
        assert_eq!(parse_timestamp("00:00:10 extra"), None);
    }
}
