//! Display formatting for maintenance window timestamps.
//!
//! Inputs are ISO-8601 local datetimes without an offset. No timezone
//! conversion happens; the `UTC` suffix is part of the display format only.

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use super::error::RenderError;

/// Shown when no timestamp was entered
pub const NOT_SPECIFIED: &str = "Not specified";

const DISPLAY_FORMAT: &str = "%b %d, %I:%M %p UTC";

lazy_static! {
    /// Zero-padded ISO-8601 local datetime with one `T` or space separator
    static ref ISO_LOCAL_REGEX: Regex = Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[T ][0-9]{2}:[0-9]{2}(?::[0-5][0-9](?:\.[0-9]{1,9})?)?)?$"
    )
    .unwrap();
}

// `%.f` also matches an absent fractional part
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 local datetime, or a bare date (taken as midnight)
pub fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    // chrono is lenient about field widths and whitespace, and reads :60 as a leap second
    if !ISO_LOCAL_REGEX.is_match(raw) {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Format a raw form timestamp for display, e.g. `Mar 05, 02:30 PM UTC`.
///
/// Absent or empty input yields [`NOT_SPECIFIED`]. Anything else that does not
/// parse is an error for `field`; it is never reported as absent.
pub fn format_datetime(field: &'static str, raw: Option<&str>) -> Result<String, RenderError> {
    let raw = match raw {
        None | Some("") => return Ok(NOT_SPECIFIED.to_string()),
        Some(raw) => raw,
    };

    parse_local(raw)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .ok_or_else(|| RenderError::InvalidDateTime {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_are_not_specified() {
        assert_eq!(format_datetime("start_time", None).unwrap(), "Not specified");
        assert_eq!(
            format_datetime("start_time", Some("")).unwrap(),
            "Not specified"
        );
    }

    #[test]
    fn test_afternoon_time() {
        assert_eq!(
            format_datetime("start_time", Some("2024-03-05T14:30")).unwrap(),
            "Mar 05, 02:30 PM UTC"
        );
    }

    #[test]
    fn test_morning_and_midnight() {
        assert_eq!(
            format_datetime("start_time", Some("2024-06-01T09:00")).unwrap(),
            "Jun 01, 09:00 AM UTC"
        );
        assert_eq!(
            format_datetime("end_time", Some("2024-12-31T00:05")).unwrap(),
            "Dec 31, 12:05 AM UTC"
        );
    }

    #[test]
    fn test_accepted_shapes() {
        let expected = "Mar 05, 02:30 PM UTC";
        for raw in [
            "2024-03-05T14:30:00",
            "2024-03-05T14:30:59.123",
            "2024-03-05 14:30",
            "2024-03-05 14:30:10",
        ] {
            assert_eq!(format_datetime("start_time", Some(raw)).unwrap(), expected, "{}", raw);
        }

        assert_eq!(
            format_datetime("start_time", Some("2024-03-05")).unwrap(),
            "Mar 05, 12:00 AM UTC"
        );
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        for raw in [
            "tomorrow",
            "2024-13-01T10:00",
            "2024-02-30T10:00",
            "2024-03-05T25:00",
            " ",
            "05/03/2024 14:30",
            "2024-6-1T9:00",
            "2024-06-01T9:5",
            " 2024-06-01T09:00",
            "2024-06-01T09:00 ",
            "2024-06-0109:00",
            "2024-06-01\t09:00",
            "2024-06-01  09:00",
            "+2024-06-01T09:00",
            "2024-06-01T09:00:60",
            "2024-06-01T09",
            "2024-06-01T09:00.5",
            "２０２４-06-01T09:00",
        ] {
            let err = format_datetime("end_time", Some(raw)).unwrap_err();
            assert_eq!(
                err,
                RenderError::InvalidDateTime {
                    field: "end_time",
                    value: raw.to_string()
                }
            );
        }
    }
}
