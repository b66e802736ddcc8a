//! Time helpers
//!
//! Order timestamps travel as ISO-8601 strings (the dashboard writes them
//! client-side). Parsing is lenient: RFC 3339 first, then the common
//! naive forms the order-entry flows produce.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

use crate::utils::{AppError, AppResult};

/// Current wall-clock time as an ISO-8601 string
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Current epoch milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's calendar date in the server's local timezone
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an order timestamp into a naive local datetime
///
/// Accepts RFC 3339 (offset converted to local), "YYYY-MM-DDTHH:MM:SS"
/// and "YYYY-MM-DDTHH:MM". Returns `None` for anything else; date filters
/// exclude orders whose timestamp cannot be parsed.
pub fn parse_order_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_naive_forms() {
        assert!(parse_order_time("2024-03-01T10:00:00Z").is_some());
        assert!(parse_order_time("2024-03-01T10:00:00").is_some());
        assert!(parse_order_time("2024-03-01T10:00").is_some());
        assert!(parse_order_time("Aguardando Pedido").is_none());
    }

    #[test]
    fn naive_parse_keeps_calendar_day() {
        let dt = parse_order_time("2024-03-01T10:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
