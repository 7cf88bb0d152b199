//! Hijri to Gregorian date normalization
//!
//! Registration exports carry dates in the Hijri calendar as plain text,
//! in either `YYYY-MM-DD` or `DD-MM-YYYY` order, separated by `-` or `/`.
//! Conversion uses the civil (tabular) calendar: months alternate 30/29
//! days, month 12 gains a day in leap years.

use calamine::Data;
use chrono::NaiveDate;

use super::sanitize::sanitize_cell;

/// Hijri years accepted by the converter (~1882-2177 CE). Anything
/// outside is treated as unconvertible rather than extrapolated.
const MIN_HIJRI_YEAR: i64 = 1300;
const MAX_HIJRI_YEAR: i64 = 1600;

/// Julian day number of 1 Muharram 1 AH (16 July 622, Julian).
const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Normalize a raw spreadsheet cell into a Gregorian date.
///
/// Native date cells are taken as already-Gregorian and only the calendar
/// date portion is kept. Text cells go through the Hijri conversion.
/// Everything else, including blanks and `-` placeholders, is `None`.
pub fn normalize_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|dt| dt.date()),
        Data::DateTimeIso(s) => parse_iso_date(s),
        _ => match sanitize_cell(cell) {
            serde_json::Value::String(s) => normalize_date_str(&s),
            _ => None,
        },
    }
}

/// Normalize a text cell holding a Hijri date.
///
/// The three parts are first read as `(year, month, day)`; when that is
/// not a valid Hijri date the reading falls back to `(day, month, year)`.
/// Years are always >= 1300 here, so no input satisfies both readings.
pub fn normalize_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let sep = if trimmed.contains('-') {
        '-'
    } else if trimmed.contains('/') {
        '/'
    } else {
        return None;
    };

    let parts: Vec<&str> = trimmed.split(sep).collect();
    if parts.len() != 3 {
        return None;
    }

    let mut nums = [0i64; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part.trim().parse().ok()?;
    }

    hijri_to_gregorian(nums[0], nums[1], nums[2])
        .or_else(|| hijri_to_gregorian(nums[2], nums[1], nums[0]))
}

/// Convert a civil-calendar Hijri date to the equivalent Gregorian date.
/// Returns `None` for out-of-range years and impossible day/month pairs.
pub fn hijri_to_gregorian(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    if !(MIN_HIJRI_YEAR..=MAX_HIJRI_YEAR).contains(&year) {
        return None;
    }
    if !(1..=12).contains(&month) {
        return None;
    }
    if day < 1 || day > hijri_month_days(year, month) {
        return None;
    }

    let jdn = HIJRI_EPOCH_JDN - 1
        + 354 * (year - 1)
        + (3 + 11 * year) / 30
        + 29 * (month - 1)
        + month / 2
        + day;
    jdn_to_gregorian(jdn)
}

/// Length of a Hijri month in the civil calendar.
fn hijri_month_days(year: i64, month: i64) -> i64 {
    if month == 12 && is_hijri_leap_year(year) {
        30
    } else if month % 2 == 1 {
        30
    } else {
        29
    }
}

/// Civil-calendar leap years follow a fixed 30-year cycle.
fn is_hijri_leap_year(year: i64) -> bool {
    (14 + 11 * year).rem_euclid(30) < 11
}

/// Standard Julian-day-number to proleptic-Gregorian conversion.
fn jdn_to_gregorian(jdn: i64) -> Option<NaiveDate> {
    let a = jdn + 32044;
    let b = (4 * a + 3) / 146097;
    let c = a - 146097 * b / 4;
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;

    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;

    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_conversions() {
        // 1 Muharram 1445 and 1 Shawwal 1446 in the civil calendar
        assert_eq!(normalize_date_str("1445-01-01"), Some(date(2023, 7, 19)));
        assert_eq!(normalize_date_str("1446-10-01"), Some(date(2025, 3, 31)));
    }

    #[test]
    fn test_day_first_order_matches_year_first() {
        for (y, m, d) in [(1445, 1, 1), (1446, 10, 1), (1398, 12, 30), (1460, 6, 29)] {
            let year_first = normalize_date_str(&format!("{}-{:02}-{:02}", y, m, d));
            let day_first = normalize_date_str(&format!("{:02}-{:02}-{}", d, m, y));
            assert!(year_first.is_some(), "{}-{}-{} did not convert", y, m, d);
            assert_eq!(year_first, day_first);
        }
    }

    #[test]
    fn test_slash_separator() {
        assert_eq!(normalize_date_str("1445/01/01"), Some(date(2023, 7, 19)));
        assert_eq!(normalize_date_str("01/01/1445"), Some(date(2023, 7, 19)));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_date_str("  1445-01-01  "), Some(date(2023, 7, 19)));
    }

    #[test]
    fn test_rejects_malformed_input() {
        for raw in ["", "   ", "not-a-date", "1-2", "1445-01", "1445-01-01-05", "20230719"] {
            assert_eq!(normalize_date_str(raw), None, "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_rejects_invalid_hijri_dates() {
        // month out of range, day past month end, non-leap month 12 cap
        assert_eq!(normalize_date_str("1445-13-01"), None);
        assert_eq!(normalize_date_str("1445-02-30"), None);
        assert_eq!(normalize_date_str("1446-12-30"), None);
        // both readings out of the supported year range
        assert_eq!(normalize_date_str("10-11-12"), None);
    }

    #[test]
    fn test_leap_year_day_360() {
        // 1445 is a leap year in the 30-year cycle: 30 Dhu al-Hijjah exists
        assert!(is_hijri_leap_year(1445));
        assert!(normalize_date_str("1445-12-30").is_some());
    }

    #[test]
    fn test_normalize_cell_blank_and_hyphen() {
        assert_eq!(normalize_date(&Data::Empty), None);
        assert_eq!(normalize_date(&Data::String("-".into())), None);
        assert_eq!(normalize_date(&Data::String("   ".into())), None);
        assert_eq!(normalize_date(&Data::Float(45000.0)), None);
    }

    #[test]
    fn test_native_datetime_kept_as_gregorian() {
        // Excel serial 45000 is 2023-03-15; native cells bypass Hijri conversion
        let cell = Data::DateTime(ExcelDateTime::new(45000.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(normalize_date(&cell), Some(date(2023, 3, 15)));
    }

    #[test]
    fn test_iso_datetime_cell() {
        let cell = Data::DateTimeIso("2024-02-29T00:00:00".into());
        assert_eq!(normalize_date(&cell), Some(date(2024, 2, 29)));
    }
}
