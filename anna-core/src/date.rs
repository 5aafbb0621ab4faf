//! Publication date parsing.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid date '{input}' (expected YYYY-MM-DD): {source}")]
pub struct DateError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse an ISO `YYYY-MM-DD` date into a Unix timestamp at UTC midnight
pub fn parse_date(input: &str) -> Result<i64, DateError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| DateError {
        input: input.to_string(),
        source,
    })?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp())
}

/// Timestamp for an optional frontmatter date; absent or blank dates are zero
pub fn timestamp_or_zero(input: Option<&str>) -> Result<i64, DateError> {
    match input {
        Some(date) if !date.trim().is_empty() => parse_date(date),
        _ => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1970-01-01").unwrap(), 0);
        assert_eq!(parse_date("2024-01-01").unwrap(), 1_704_067_200);
        assert_eq!(parse_date("2023-01-01").unwrap(), 1_672_531_200);
    }

    #[test]
    fn test_invalid_dates() {
        assert!(parse_date("2024/01/01").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("yesterday").is_err());
        let err = parse_date("01-02-2024").unwrap_err();
        assert!(err.to_string().contains("01-02-2024"));
    }

    #[test]
    fn test_missing_date_is_zero() {
        assert_eq!(timestamp_or_zero(None).unwrap(), 0);
        assert_eq!(timestamp_or_zero(Some("  ")).unwrap(), 0);
        assert_eq!(timestamp_or_zero(Some("2024-01-01")).unwrap(), 1_704_067_200);
    }
}
