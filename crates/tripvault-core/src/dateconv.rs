//! Date formatting shared by every persisted record.
//!
//! Two canonical textual formats, one per field family: day precision
//! (`yy.MM.dd`) for schedule date ranges and memory upload dates, second
//! precision (`yy.MM.dd.HH.mm.ss`) for the plan-level update stamp. Unset
//! dates serialise as the empty string. Mixing the formats across reads and
//! writes corrupts round-tripping, so every caller goes through this module.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%y.%m.%d";
const TIMESTAMP_FORMAT: &str = "%y.%m.%d.%H.%M.%S";

/// Format a day-precision date, or the empty string when unset.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Parse a day-precision date. Empty or malformed text yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Format a second-precision timestamp, or the empty string when unset.
pub fn format_timestamp(stamp: Option<NaiveDateTime>) -> String {
    match stamp {
        Some(stamp) => stamp.format(TIMESTAMP_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Parse a second-precision timestamp. Empty or malformed text yields `None`.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, dayn: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dayn).expect("valid date")
    }

    #[test]
    fn date_round_trips_at_day_precision() {
        let date = day(2023, 2, 18);
        let text = format_date(Some(date));
        assert_eq!(text, "23.02.18");
        assert_eq!(parse_date(&text), Some(date));
    }

    #[test]
    fn unset_date_is_empty_string_both_ways() {
        assert_eq!(format_date(None), "");
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn malformed_date_parses_to_none() {
        assert_eq!(parse_date("2023-02-18"), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn timestamp_round_trips_at_second_precision() {
        let stamp = day(2023, 3, 7).and_hms_opt(14, 30, 5).expect("valid time");
        let text = format_timestamp(Some(stamp));
        assert_eq!(text, "23.03.07.14.30.05");
        assert_eq!(parse_timestamp(&text), Some(stamp));
    }

    #[test]
    fn timestamp_rejects_date_only_text() {
        assert_eq!(parse_timestamp("23.03.07"), None);
        assert_eq!(format_timestamp(None), "");
    }
}
