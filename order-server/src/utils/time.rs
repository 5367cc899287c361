//! Business timezone helpers
//!
//! "Today" for orders, numbering and reports is the business date in the
//! restaurant's timezone, shifted by the optional day cutoff. Repositories
//! never read the clock: callers pass the date key and timestamps in.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Date key format stored in `orders.business_date` and `order_summaries.summary_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a cutoff time (HH:MM), falling back to midnight
pub fn parse_cutoff(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse business day cutoff '{}': {}, falling back to 00:00",
            cutoff,
            e
        );
        NaiveTime::MIN
    })
}

/// Parse an IANA timezone name, falling back to America/Sao_Paulo
pub fn parse_timezone(name: &str) -> Tz {
    name.parse::<Tz>().unwrap_or_else(|e| {
        tracing::warn!("Unknown timezone '{}': {}, using America/Sao_Paulo", name, e);
        chrono_tz::America::Sao_Paulo
    })
}

/// Business clock: timezone plus day cutoff
///
/// Before the cutoff the restaurant is still in "yesterday's" business day.
#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    pub tz: Tz,
    pub cutoff: NaiveTime,
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self {
            tz: chrono_tz::America::Sao_Paulo,
            cutoff: NaiveTime::MIN,
        }
    }
}

impl BusinessClock {
    pub fn new(tz: Tz, cutoff: NaiveTime) -> Self {
        Self { tz, cutoff }
    }

    /// Business date at the given instant
    pub fn business_date_at(&self, at: DateTime<Utc>) -> NaiveDate {
        let local = at.with_timezone(&self.tz);
        if local.time() < self.cutoff {
            (local - chrono::Duration::days(1)).date_naive()
        } else {
            local.date_naive()
        }
    }

    /// Current business date
    pub fn today(&self) -> NaiveDate {
        self.business_date_at(Utc::now())
    }

    /// Current business date as the stored key
    pub fn today_key(&self) -> String {
        date_key(self.today())
    }

    /// Format a Unix-millis timestamp as local date and time for receipts
    pub fn format_local(&self, millis: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&self.tz).format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Stored key for a date
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Unix millis one rolling week before `now`
pub fn week_ago_millis(now: DateTime<Utc>) -> i64 {
    (now - chrono::Duration::days(7)).timestamp_millis()
}

/// Unix millis one calendar month before `now`
///
/// Clamps to the end of a shorter month (03-31 → 02-28).
pub fn month_ago_millis(now: DateTime<Utc>) -> i64 {
    now.checked_sub_months(Months::new(1))
        .unwrap_or(now - chrono::Duration::days(30))
        .timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(parse_date("14/03/2025").is_err());
    }

    #[test]
    fn test_business_date_uses_timezone() {
        let clock = BusinessClock::default();
        // 01:30 UTC is still the previous evening in São Paulo (UTC-3)
        let at = Utc.with_ymd_and_hms(2025, 3, 15, 1, 30, 0).unwrap();
        assert_eq!(date_key(clock.business_date_at(at)), "2025-03-14");
    }

    #[test]
    fn test_business_date_respects_cutoff() {
        let clock = BusinessClock::new(chrono_tz::UTC, parse_cutoff("04:00"));
        let before = Utc.with_ymd_and_hms(2025, 3, 15, 3, 59, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 15, 4, 0, 0).unwrap();
        assert_eq!(date_key(clock.business_date_at(before)), "2025-03-14");
        assert_eq!(date_key(clock.business_date_at(after)), "2025-03-15");
    }

    #[test]
    fn test_parse_cutoff_fallback() {
        assert_eq!(parse_cutoff("bad"), NaiveTime::MIN);
        assert_eq!(parse_timezone("Mars/Olympus"), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn test_month_ago_clamps() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap();
        assert_eq!(month_ago_millis(now), expected.timestamp_millis());
        assert_eq!(
            week_ago_millis(now),
            Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_format_local() {
        let clock = BusinessClock::default();
        let millis = Utc.with_ymd_and_hms(2025, 3, 14, 15, 5, 0).unwrap().timestamp_millis();
        assert_eq!(clock.format_local(millis), "14/03/2025 12:05");
    }
}
