//! Canonical synoptic-hour time handling.
//!
//! Source imagery is produced four times a day, at the fixed UTC hours
//! 03, 09, 15 and 21. Every timestamp the program works with is first
//! rounded onto that grid and rendered as a `YYYYMMDD-HHMMUT` token,
//! which downstream matching uses as a substring key against filenames.

use std::fmt;

use chrono::{Duration, NaiveDateTime, Timelike};

/// Canonical timestamp token, format `YYYYMMDD-HHMMUT`.
///
/// Only [`canonicalize`] produces these; the hour component is always
/// one of 03, 09, 15, 21 and the minutes are always `00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeToken(String);

impl TimeToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `YYYY` component.
    pub fn year(&self) -> &str {
        &self.0[0..4]
    }

    /// `MM` component.
    pub fn month(&self) -> &str {
        &self.0[4..6]
    }
}

impl fmt::Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round a timestamp onto the synoptic grid.
///
/// Hours map by half-open bands: [21,24)∪[0,3) → 21, [3,9) → 3,
/// [9,15) → 9, [15,21) → 15. Inputs before 03:00 belong to the
/// previous day's 21UT frame, so the timestamp is shifted back three
/// hours before the hour is pinned; pinning the hour on the original
/// date would put e.g. 01:30 on the wrong day.
pub fn canonicalize(t: NaiveDateTime) -> TimeToken {
    let mut t = t;
    let hour = t.hour();
    let new_hour = if hour < 3 {
        t -= Duration::hours(3);
        21
    } else if hour < 9 {
        3
    } else if hour < 15 {
        9
    } else if hour < 21 {
        15
    } else {
        21
    };
    let pinned = t
        .date()
        .and_hms_opt(new_hour, 0, 0)
        .expect("synoptic hour is a valid time of day");
    TimeToken(pinned.format("%Y%m%d-%H%MUT").to_string())
}

/// Build the ordered token sequence for a time window.
///
/// The first element is always `canonicalize(start)`, even when
/// `start > end`. The cursor then steps from the original,
/// uncanonicalized `start`; the termination check happens before each
/// advance, so the last token may overshoot `end` by at most one step.
/// Steps smaller than the 6-hour grid resolution yield duplicate
/// tokens, which the greedy matcher downstream tolerates.
pub fn build_time_array(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step_hours: f64,
) -> Vec<TimeToken> {
    let mut tokens = vec![canonicalize(start)];
    if step_hours <= 0.0 {
        return tokens;
    }
    let step = Duration::milliseconds((step_hours * 3_600_000.0).round() as i64);
    let mut cursor = start;
    while cursor <= end {
        cursor += step;
        tokens.push(canonicalize(cursor));
    }
    tracing::debug!(count = tokens.len(), "time array built");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn every_hour_lands_on_a_synoptic_hour() {
        for hour in 0..24 {
            let token = canonicalize(at(2024, 3, 15, hour, 30));
            let hh = &token.as_str()[9..11];
            assert!(
                matches!(hh, "03" | "09" | "15" | "21"),
                "hour {hour} produced {token}"
            );
            assert!(token.as_str().ends_with("00UT"));
        }
    }

    #[test]
    fn hours_before_three_roll_back_to_previous_day() {
        for hour in 0..3 {
            let token = canonicalize(at(2024, 3, 15, hour, 30));
            assert_eq!(token.as_str(), "20240314-2100UT", "hour {hour}");
        }
        // Month boundary rolls back too.
        assert_eq!(
            canonicalize(at(2024, 3, 1, 1, 0)).as_str(),
            "20240229-2100UT"
        );
    }

    #[test]
    fn hour_bands_keep_the_date_from_three_onwards() {
        let cases = [
            (3, "20240315-0300UT"),
            (8, "20240315-0300UT"),
            (9, "20240315-0900UT"),
            (14, "20240315-0900UT"),
            (15, "20240315-1500UT"),
            (20, "20240315-1500UT"),
            (21, "20240315-2100UT"),
            (23, "20240315-2100UT"),
        ];
        for (hour, expected) in cases {
            assert_eq!(canonicalize(at(2024, 3, 15, hour, 45)).as_str(), expected);
        }
    }

    #[test]
    fn array_covers_window_with_pre_advance_termination() {
        let tokens = build_time_array(at(2024, 1, 1, 0, 0), at(2024, 1, 1, 12, 0), 6.0);
        let got: Vec<&str> = tokens.iter().map(TimeToken::as_str).collect();
        assert_eq!(
            got,
            vec![
                "20231231-2100UT", // 00:00 rolls back to the previous day
                "20240101-0300UT", // 06:00
                "20240101-0900UT", // 12:00
                "20240101-1500UT", // 18:00, cursor was <= end before the advance
            ]
        );
    }

    #[test]
    fn start_after_end_still_yields_the_start_token() {
        let tokens = build_time_array(at(2024, 1, 2, 12, 0), at(2024, 1, 1, 0, 0), 6.0);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].as_str(), "20240102-0900UT");
    }

    #[test]
    fn sub_grid_steps_produce_duplicate_tokens() {
        let tokens = build_time_array(at(2024, 1, 1, 3, 0), at(2024, 1, 1, 6, 0), 1.0);
        assert!(tokens.len() > 4);
        assert!(tokens.iter().all(|t| t.as_str() == "20240101-0300UT"
            || t.as_str() == "20240101-0900UT"));
        let first_count = tokens
            .iter()
            .filter(|t| t.as_str() == "20240101-0300UT")
            .count();
        assert!(first_count > 1, "expected duplicates, got {tokens:?}");
    }

    #[test]
    fn fractional_steps_advance_the_cursor() {
        let tokens = build_time_array(at(2024, 1, 1, 3, 0), at(2024, 1, 1, 15, 0), 7.5);
        let got: Vec<&str> = tokens.iter().map(TimeToken::as_str).collect();
        // 03:00, 10:30, 18:00 (cursor at 10:30 was <= end, so one more advance)
        assert_eq!(
            got,
            vec!["20240101-0300UT", "20240101-0900UT", "20240101-1500UT"]
        );
    }
}
