//! Expiry classification for batches
//!
//! Expiry dates arrive as `DD-MMM-YY` strings (e.g. `31-May-26`). Days are
//! counted from the evaluation instant to midnight of the expiry date,
//! rounded up to whole days, so a batch expiring today is at day 0.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::InventoryRecord;

const SECONDS_PER_DAY: i64 = 86_400;

/// Batches expiring in fewer days than this are `expiring-soon`
pub const EXPIRING_SOON_DAYS: i64 = 90;

/// Batches expiring in fewer days than this are `attention`
pub const ATTENTION_DAYS: i64 = 180;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Reasons an expiry date string cannot be read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("expected DD-MMM-YY, got {0:?}")]
    WrongFieldCount(String),

    #[error("invalid day {0:?}")]
    InvalidDay(String),

    #[error("unrecognized month {0:?}")]
    UnknownMonth(String),

    #[error("invalid two-digit year {0:?}")]
    InvalidYear(String),

    #[error("no such calendar date: {0}")]
    NoSuchDate(String),
}

/// Parse a `DD-MMM-YY` date. The month token is matched case-insensitively
/// on its first three letters and the year is taken to be in the 2000s.
pub fn parse_expiry_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let fields: Vec<&str> = input.trim().split('-').collect();
    let [day, month, year] = fields.as_slice() else {
        return Err(DateParseError::WrongFieldCount(input.to_string()));
    };

    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| DateParseError::InvalidDay(day.to_string()))?;

    let month_token = month.trim().to_lowercase();
    let month_index = month_token
        .get(..3)
        .and_then(|prefix| MONTHS.iter().position(|m| *m == prefix))
        .ok_or_else(|| DateParseError::UnknownMonth(month.to_string()))?;

    let year = year.trim();
    if year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError::InvalidYear(year.to_string()));
    }
    let year: i32 = 2000
        + year
            .parse::<i32>()
            .map_err(|_| DateParseError::InvalidYear(year.to_string()))?;

    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, day)
        .ok_or_else(|| DateParseError::NoSuchDate(input.to_string()))
}

/// Expiry category of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Attention,
    Good,
    /// The expiry date could not be parsed
    Error,
}

impl ExpiryStatus {
    pub fn from_days(days_until_expiry: i64) -> Self {
        match days_until_expiry {
            d if d < 0 => ExpiryStatus::Expired,
            d if d < EXPIRING_SOON_DAYS => ExpiryStatus::ExpiringSoon,
            d if d < ATTENTION_DAYS => ExpiryStatus::Attention,
            _ => ExpiryStatus::Good,
        }
    }

    /// Projection used by views that only show three buckets
    pub fn three_bucket(self) -> Self {
        match self {
            ExpiryStatus::Attention => ExpiryStatus::Good,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::ExpiringSoon => "expiring-soon",
            ExpiryStatus::Attention => "attention",
            ExpiryStatus::Good => "good",
            ExpiryStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one expiry date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryClassification {
    /// Absent when the date could not be parsed
    pub days_until_expiry: Option<i64>,
    pub status: ExpiryStatus,
}

impl ExpiryClassification {
    fn error() -> Self {
        Self {
            days_until_expiry: None,
            status: ExpiryStatus::Error,
        }
    }

    fn from_days(days: i64) -> Self {
        Self {
            days_until_expiry: Some(days),
            status: ExpiryStatus::from_days(days),
        }
    }
}

/// Whole days from `now` until midnight of `expiry`, rounded up.
pub fn days_until(expiry: NaiveDate, now: NaiveDateTime) -> i64 {
    let seconds = (expiry.and_time(NaiveTime::MIN) - now).num_seconds();
    // Integer division truncates toward zero, which is already the ceiling
    // for negative spans.
    let days = seconds / SECONDS_PER_DAY;
    if seconds % SECONDS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Classify an expiry date as of the start of the given calendar day.
pub fn classify_expiry(expiry_date: &str, as_of: NaiveDate) -> ExpiryClassification {
    classify_expiry_at(expiry_date, as_of.and_time(NaiveTime::MIN))
}

/// Classify an expiry date as of an exact instant.
pub fn classify_expiry_at(expiry_date: &str, now: NaiveDateTime) -> ExpiryClassification {
    match parse_expiry_date(expiry_date) {
        Ok(expiry) => ExpiryClassification::from_days(days_until(expiry, now)),
        Err(_) => ExpiryClassification::error(),
    }
}

/// One batch with its expiry classification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExpiry {
    pub id: String,
    pub particulars: String,
    pub particular_id: String,
    pub expiry_date: String,
    pub quantity: i64,
    #[serde(flatten)]
    pub classification: ExpiryClassification,
}

impl BatchExpiry {
    fn new(record: &InventoryRecord, now: NaiveDateTime) -> Self {
        Self {
            id: record.id.clone(),
            particulars: record.particulars.clone(),
            particular_id: record.particular_id.clone(),
            expiry_date: record.expiry_date.clone(),
            quantity: record.on_hand(),
            classification: classify_expiry_at(&record.expiry_date, now),
        }
    }
}

/// Batch counts per expiry status
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryCounts {
    pub expired: u32,
    pub expiring_soon: u32,
    pub attention: u32,
    pub good: u32,
    pub error: u32,
}

impl ExpiryCounts {
    fn record(&mut self, status: ExpiryStatus) {
        match status {
            ExpiryStatus::Expired => self.expired += 1,
            ExpiryStatus::ExpiringSoon => self.expiring_soon += 1,
            ExpiryStatus::Attention => self.attention += 1,
            ExpiryStatus::Good => self.good += 1,
            ExpiryStatus::Error => self.error += 1,
        }
    }
}

/// Expiry timeline: batches closest to expiry first, unreadable dates last
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryReport {
    pub counts: ExpiryCounts,
    pub batches: Vec<BatchExpiry>,
}

pub fn expiry_report(records: &[InventoryRecord], now: NaiveDateTime) -> ExpiryReport {
    let mut counts = ExpiryCounts::default();
    let mut batches: Vec<BatchExpiry> = records
        .iter()
        .map(|record| {
            let batch = BatchExpiry::new(record, now);
            counts.record(batch.classification.status);
            batch
        })
        .collect();

    batches.sort_by_key(|b| (b.classification.days_until_expiry.is_none(), b.classification.days_until_expiry));

    ExpiryReport { counts, batches }
}

/// Batches that have not expired and expire within `days` days (inclusive)
pub fn expiring_within(
    records: &[InventoryRecord],
    now: NaiveDateTime,
    days: i64,
) -> Vec<BatchExpiry> {
    let mut batches: Vec<BatchExpiry> = records
        .iter()
        .map(|record| BatchExpiry::new(record, now))
        .filter(|b| matches!(b.classification.days_until_expiry, Some(d) if (0..=days).contains(&d)))
        .collect();
    batches.sort_by_key(|b| b.classification.days_until_expiry);
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_expiry_date() {
        assert_eq!(parse_expiry_date("31-May-26"), Ok(date(2026, 5, 31)));
        assert_eq!(parse_expiry_date("01-DEC-24"), Ok(date(2024, 12, 1)));
        assert_eq!(parse_expiry_date("15-march-24"), Ok(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        assert!(matches!(parse_expiry_date("31/05/26"), Err(DateParseError::WrongFieldCount(_))));
        assert!(matches!(parse_expiry_date("31-May"), Err(DateParseError::WrongFieldCount(_))));
        assert!(matches!(parse_expiry_date("31-Foo-26"), Err(DateParseError::UnknownMonth(_))));
        assert!(matches!(parse_expiry_date("31-Ma-26"), Err(DateParseError::UnknownMonth(_))));
        assert!(matches!(parse_expiry_date("xx-May-26"), Err(DateParseError::InvalidDay(_))));
        assert!(matches!(parse_expiry_date("01-May-2026"), Err(DateParseError::InvalidYear(_))));
        assert!(matches!(parse_expiry_date("31-Feb-26"), Err(DateParseError::NoSuchDate(_))));
    }

    #[test]
    fn test_mid_quarter_scenario() {
        let result = classify_expiry("15-Mar-24", date(2024, 1, 1));
        assert_eq!(result.days_until_expiry, Some(74));
        assert_eq!(result.status, ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn test_boundaries() {
        let today = date(2024, 1, 1);
        let fmt = |d: NaiveDate| d.format("%d-%b-%y").to_string();

        let at_zero = classify_expiry(&fmt(today), today);
        assert_eq!(at_zero.days_until_expiry, Some(0));
        assert_eq!(at_zero.status, ExpiryStatus::ExpiringSoon);

        let at_90 = classify_expiry(&fmt(today + Duration::days(90)), today);
        assert_eq!(at_90.status, ExpiryStatus::Attention);

        let at_89 = classify_expiry(&fmt(today + Duration::days(89)), today);
        assert_eq!(at_89.status, ExpiryStatus::ExpiringSoon);

        let at_180 = classify_expiry(&fmt(today + Duration::days(180)), today);
        assert_eq!(at_180.status, ExpiryStatus::Good);

        let yesterday = classify_expiry(&fmt(today - Duration::days(1)), today);
        assert_eq!(yesterday.days_until_expiry, Some(-1));
        assert_eq!(yesterday.status, ExpiryStatus::Expired);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let now = date(2024, 1, 1).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(days_until(date(2024, 1, 1), now), 0);
        assert_eq!(days_until(date(2024, 1, 2), now), 1);
        assert_eq!(days_until(date(2023, 12, 31), now), -1);
    }

    #[test]
    fn test_malformed_date_is_explicit_error() {
        let result = classify_expiry("not-a-date", date(2024, 1, 1));
        assert_eq!(result.status, ExpiryStatus::Error);
        assert_eq!(result.days_until_expiry, None);
    }

    #[test]
    fn test_three_bucket_projection() {
        assert_eq!(ExpiryStatus::Attention.three_bucket(), ExpiryStatus::Good);
        assert_eq!(ExpiryStatus::ExpiringSoon.three_bucket(), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::Expired.three_bucket(), ExpiryStatus::Expired);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ExpiryStatus::ExpiringSoon).unwrap();
        assert_eq!(json, "\"expiring-soon\"");
    }
}
