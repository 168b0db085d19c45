//! Field normalizers shared by every dialect assembler.
//!
//! All functions here are pure. Callers check presence before formatting:
//! an absent timestamp is never rendered.

pub mod sequence;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::constants::{CDM_DATE_PATTERN, CDM_TIMESTAMP_PATTERN, ISO_UTC_PATTERN};
use crate::error::{RelayError, Result};

pub use sequence::{RandomSequence, SeededSequence, SequenceSource};

/// Pad short flight numbers to at least three digits.
///
/// Inputs of four characters or fewer are parsed as an integer and rendered
/// zero-padded (`"25"` -> `"025"`, `"0025"` -> `"025"`). Longer inputs pass
/// through untouched. A short input that is not numeric is an error.
pub fn normalize_flight_number(flight_number: &str) -> Result<String> {
    if flight_number.chars().count() > 4 {
        return Ok(flight_number.to_string());
    }
    let number: i32 = flight_number
        .parse()
        .map_err(|_| RelayError::invalid_field("FlightNumber", flight_number))?;
    Ok(format!("{:03}", number))
}

/// `YYYY-MM-DDTHH:MM:SSZ`, wall clock as carried by the timestamp
pub fn format_iso_utc(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(ISO_UTC_PATTERN).to_string()
}

/// `dd/MM/yyyy HH:mm`
pub fn format_cdm_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(CDM_DATE_PATTERN).to_string()
}

/// `dd/MM/yyyy HH:mm:ss.SSS`
pub fn format_cdm_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(CDM_TIMESTAMP_PATTERN).to_string()
}

/// A calendar date rendered with the CDM date pattern at midnight
pub fn format_cdm_flight_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y 00:00").to_string()
}

/// Derive the transaction identifier from a correlation header value.
///
/// Keeps whatever follows the first colon, strips hyphens and trims. A value
/// without a colon is used whole.
pub fn extract_transaction_identifier(message_id: Option<&str>) -> Option<String> {
    message_id.map(|id| {
        let tail = id.split_once(':').map(|(_, rest)| rest).unwrap_or(id);
        tail.replace('-', "").trim().to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(offset_hours: i32, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            + chrono::Duration::milliseconds(ms as i64)
    }

    #[test]
    fn test_flight_number_padding() {
        assert_eq!(normalize_flight_number("25").unwrap(), "025");
        assert_eq!(normalize_flight_number("7").unwrap(), "007");
        assert_eq!(normalize_flight_number("123").unwrap(), "123");
        assert_eq!(normalize_flight_number("1234").unwrap(), "1234");
        assert_eq!(normalize_flight_number("0025").unwrap(), "025");
        assert_eq!(normalize_flight_number("12345").unwrap(), "12345");
    }

    #[test]
    fn test_flight_number_long_values_pass_through_unparsed() {
        assert_eq!(normalize_flight_number("12A45").unwrap(), "12A45");
    }

    #[test]
    fn test_flight_number_rejects_non_numeric() {
        let err = normalize_flight_number("12A").unwrap_err();
        assert!(matches!(err, RelayError::InvalidField { ref field, .. } if field == "FlightNumber"));
        assert!(normalize_flight_number("").is_err());
    }

    #[test]
    fn test_flight_number_normalization_is_idempotent() {
        for input in ["1", "25", "025", "0025", "123", "9999", "12345", "642718"] {
            let once = normalize_flight_number(input).unwrap();
            let twice = normalize_flight_number(&once).unwrap();
            assert_eq!(once, twice, "input {input}");
        }
    }

    #[test]
    fn test_timestamp_patterns_keep_wall_clock() {
        let ts = at(2, 2024, 5, 1, 9, 5, 7, 42);
        assert_eq!(format_iso_utc(&ts), "2024-05-01T09:05:07Z");
        assert_eq!(format_cdm_date(&ts), "01/05/2024 09:05");
        assert_eq!(format_cdm_timestamp(&ts), "01/05/2024 09:05:07.042");
    }

    #[test]
    fn test_flight_date_renders_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(format_cdm_flight_date(&date), "03/12/2024 00:00");
    }

    #[test]
    fn test_transaction_identifier_extraction() {
        assert_eq!(
            extract_transaction_identifier(Some("urn:abc-123-xyz")),
            Some("abc123xyz".to_string())
        );
        assert_eq!(
            extract_transaction_identifier(Some("urn:uuid:5f0c-77aa ")),
            Some("uuid:5f0c77aa".to_string())
        );
        assert_eq!(
            extract_transaction_identifier(Some("plain-id")),
            Some("plainid".to_string())
        );
        assert_eq!(extract_transaction_identifier(None), None);
    }
}
