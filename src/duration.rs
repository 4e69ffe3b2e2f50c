//! Conversion between `HH:MM:SS` entry strings and microsecond durations.
//!
//! Both directions are total functions. Parsing is permissive: any character
//! that is not an ASCII digit at a digit position (the `_` placeholder, a
//! stray letter, or a position missing from a short string) reads as zero.
//! Minutes and seconds are clamped into `[0, 60]` rather than rejected, so an
//! entry like `00:99:00` counts down from one hour.
//!
//! ```rust
//! use bubbletea_countdown::duration::{format, parse, MICROS_PER_SECOND};
//!
//! assert_eq!(parse("00:01:30"), 90 * MICROS_PER_SECOND);
//! assert_eq!(parse("__:__:05"), 5 * MICROS_PER_SECOND);
//! assert_eq!(format(3_661 * MICROS_PER_SECOND), "01:01:01");
//! ```

/// Microseconds in one second.
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Largest value accepted for the minutes and seconds fields.
pub const FIELD_CLAMP: u64 = 60;

/// Character offsets of the (tens, units) digits for hours, minutes, seconds.
const FIELD_OFFSETS: [(usize, usize); 3] = [(0, 1), (3, 4), (6, 7)];

fn digit_at(chars: &[char], index: usize) -> u64 {
    chars
        .get(index)
        .and_then(|c| c.to_digit(10))
        .map(u64::from)
        .unwrap_or(0)
}

/// Combines hours, minutes and seconds into microseconds.
///
/// Minutes and seconds are clamped to [`FIELD_CLAMP`]; hours are not.
pub fn from_fields(hours: u64, minutes: u64, seconds: u64) -> u64 {
    let minutes = minutes.min(FIELD_CLAMP);
    let seconds = seconds.min(FIELD_CLAMP);
    hours
        .saturating_mul(60)
        .saturating_add(minutes)
        .saturating_mul(60)
        .saturating_add(seconds)
        .saturating_mul(MICROS_PER_SECOND)
}

/// Reads an `HH:MM:SS` buffer as a duration in microseconds.
///
/// The colon positions are never inspected, so `"12345678"` reads the same
/// digits as `"12:45:78"` (with the clamps applied to minutes and seconds).
pub fn parse(buffer: &str) -> u64 {
    let chars: Vec<char> = buffer.chars().collect();
    let [hours, minutes, seconds] =
        FIELD_OFFSETS.map(|(tens, units)| digit_at(&chars, tens) * 10 + digit_at(&chars, units));
    from_fields(hours, minutes, seconds)
}

/// Renders a microsecond duration as `HH:MM:SS`.
///
/// Minutes and seconds wrap at 60. Hours are never wrapped; from 100 hours
/// upward the hours field grows past two digits instead of being truncated.
/// Sub-second remainders are dropped.
pub fn format(micros: u64) -> String {
    let seconds = micros / MICROS_PER_SECOND;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    format!("{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_ENTRY: u64 = (99 * 3600 + 60 * 60 + 60) * MICROS_PER_SECOND;

    #[test]
    fn test_format_zero() {
        assert_eq!(format(0), "00:00:00");
    }

    #[test]
    fn test_format_fields() {
        assert_eq!(format(3_661 * MICROS_PER_SECOND), "01:01:01");
        assert_eq!(format(59 * MICROS_PER_SECOND), "00:00:59");
        assert_eq!(format(60 * MICROS_PER_SECOND), "00:01:00");
        assert_eq!(format(99 * 3600 * MICROS_PER_SECOND), "99:00:00");
    }

    #[test]
    fn test_format_truncates_sub_second() {
        assert_eq!(format(1_999_999), "00:00:01");
        assert_eq!(format(999_999), "00:00:00");
    }

    #[test]
    fn test_format_widens_large_hours() {
        // The largest entry (99:60:60) starts above 100 hours.
        assert_eq!(format(MAX_ENTRY), "100:01:00");
        assert_eq!(format(1_234 * 3600 * MICROS_PER_SECOND), "1234:00:00");
    }

    #[test]
    fn test_parse_full_entry() {
        assert_eq!(
            parse("12:34:56"),
            (12 * 3600 + 34 * 60 + 56) * MICROS_PER_SECOND
        );
    }

    #[test]
    fn test_parse_placeholders_read_as_zero() {
        assert_eq!(parse("__:__:__"), 0);
        assert_eq!(parse("1_:__:__"), 10 * 3600 * MICROS_PER_SECOND);
        assert_eq!(parse("ab:cd:ef"), 0);
    }

    #[test]
    fn test_parse_short_input() {
        assert_eq!(parse(""), 0);
        assert_eq!(parse("01"), 3600 * MICROS_PER_SECOND);
    }

    #[test]
    fn test_parse_clamps_minutes_and_seconds() {
        assert_eq!(parse("00:99:00"), 60 * 60 * MICROS_PER_SECOND);
        assert_eq!(parse("00:00:75"), 60 * MICROS_PER_SECOND);
        // 60 is kept as-is rather than carried into the next field.
        assert_eq!(parse("00:60:60"), (60 * 60 + 60) * MICROS_PER_SECOND);
    }

    #[test]
    fn test_parse_is_bounded() {
        assert_eq!(parse("99:99:99"), MAX_ENTRY);
        for buffer in ["00:00:00", "99:60:60", "9_:_9:9_", "__:__:__"] {
            assert!(parse(buffer) <= MAX_ENTRY, "{} out of range", buffer);
        }
    }

    #[test]
    fn test_round_trip_whole_seconds() {
        let samples = [
            0,
            1,
            59,
            60,
            61,
            3_599,
            3_600,
            45_296,
            99 * 3600 + 59 * 60 + 59,
        ];
        for secs in samples {
            let d = secs * MICROS_PER_SECOND;
            assert_eq!(parse(&format(d)), d, "round trip of {}s", secs);
        }
    }

    #[test]
    fn test_round_trip_drops_sub_second() {
        let d = 5 * MICROS_PER_SECOND + 250_000;
        assert_eq!(parse(&format(d)), 5 * MICROS_PER_SECOND);
    }

    #[test]
    fn test_from_fields_saturates() {
        assert_eq!(from_fields(u64::MAX, 0, 0), u64::MAX);
        assert_eq!(from_fields(1, 61, 61), (3600 + 3600 + 60) * MICROS_PER_SECOND);
    }
}
