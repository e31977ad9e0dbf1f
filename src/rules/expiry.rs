//! Expiry calculation — maps a test name to a validity horizon.
//!
//! Annual certifications (cardiac, eye) expire after one year, physical
//! structure evaluations after two, and DNA/genetic results never expire.

use chrono::{Datelike, NaiveDate};

/// Ordered keyword table; case-insensitive substring match on the test
/// name, first match wins. `None` years means lifetime validity.
const EXPIRY_RULES: &[(&[&str], Option<u32>)] = &[
    (&["cardiac", "heart"], Some(1)),
    (&["eye", "ophthalmologist"], Some(1)),
    (&["boas"], Some(2)),
    (&["hip", "elbow", "patella"], Some(2)),
    (&["dna", "genetic"], None),
];

const DEFAULT_VALIDITY_YEARS: u32 = 1;

/// Compute the expiry date for a test performed on `test_date`.
/// Returns `None` for tests that are valid for life.
pub fn expiry_of(test: &str, test_date: NaiveDate) -> Option<NaiveDate> {
    let test = test.to_lowercase();

    let years = EXPIRY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| test.contains(k)))
        .map(|(_, years)| *years)
        .unwrap_or(Some(DEFAULT_VALIDITY_YEARS));

    years.map(|y| add_years(test_date, y))
}

/// Add whole calendar years. Feb 29 lands on Feb 28 when the target
/// year is not a leap year; years past the calendar ceiling clamp to
/// `NaiveDate::MAX` rather than panicking.
fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    let year = date.year().saturating_add(years as i32);
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(NaiveDate::MAX)
}
