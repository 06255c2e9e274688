//! Finish-time parsing.
//!
//! Performances are free text such as `"4:51:39 h"`. Anything that does not
//! read as exactly `hours:minutes:seconds` is treated as missing.

/// Convert a duration like `"3:15:42 h"` into seconds.
///
/// Leading and trailing `h` markers and surrounding whitespace are stripped,
/// then exactly three non-negative integer fields are required. Returns
/// `None` for every malformed input; it never fails.
pub fn performance_seconds(text: &str) -> Option<u64> {
    let trimmed = text.trim_matches('h').trim();

    let mut fields = trimmed.split(':');
    let hours = parse_field(fields.next()?)?;
    let minutes = parse_field(fields.next()?)?;
    let seconds = parse_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

fn parse_field(field: &str) -> Option<u64> {
    field.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(performance_seconds("3:15:42"), Some(11742));
        assert_eq!(performance_seconds("0:00:00"), Some(0));
    }

    #[test]
    fn strips_hour_marker() {
        assert_eq!(performance_seconds("4:51:39 h"), Some(17499));
        assert_eq!(performance_seconds("h4:51:39"), Some(17499));
        assert_eq!(performance_seconds(" 4:51:39 h"), Some(17499));
    }

    #[test]
    fn hours_are_unbounded() {
        assert_eq!(performance_seconds("250:00:01 h"), Some(900_001));
    }

    #[test]
    fn malformed_inputs_are_missing() {
        for bad in ["", "abc", "12:30", "1:2:3:4", "1:xx:3", "1::3", "-1:00:00", "123.5 km"] {
            assert_eq!(performance_seconds(bad), None, "{bad:?}");
        }
    }

    proptest! {
        #[test]
        fn well_formed_durations_round_trip(h in 0u64..1000, m in 0u64..60, s in 0u64..60) {
            let text = format!("{h}:{m:02}:{s:02} h");
            prop_assert_eq!(performance_seconds(&text), Some(h * 3600 + m * 60 + s));
        }

        #[test]
        fn never_panics(text in ".*") {
            let _ = performance_seconds(&text);
        }
    }
}
