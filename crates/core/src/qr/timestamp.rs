//! Issuance timestamp handling
//!
//! The secure QR stores its issuance time in IST as 17 ASCII digits,
//! `YYYYMMDDHHMMSSmmm`, right after the last four Aadhaar digits of the
//! reference id. The offset is a structural constant of the format.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::{QrError, Result};
use crate::qr::splice::splice_bytes;
use crate::qr::types::{FrameLayout, TIMESTAMP_LEN, TIMESTAMP_OFFSET};

/// IST is UTC+5:30
pub const IST_OFFSET_SECS: i64 = 5 * 3600 + 30 * 60;

/// Render `now` as IST `YYYYMMDDHHMMSSmmm`
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    let local = now.naive_utc() + Duration::seconds(IST_OFFSET_SECS);
    local.format("%Y%m%d%H%M%S%3f").to_string()
}

/// Write a fresh timestamp over bytes `[6, 22]` of a legacy record
pub fn restamp_record(record: &[u8], now: DateTime<Utc>) -> Result<Vec<u8>> {
    let stamp = format_timestamp(now);
    if stamp.len() != TIMESTAMP_LEN {
        return Err(QrError::InvalidTimestamp(format!(
            "Timestamp '{}' is not {} digits wide",
            stamp, TIMESTAMP_LEN
        )));
    }

    log::debug!("Restamping record with {}", stamp);
    splice_bytes(
        record,
        stamp.as_bytes(),
        TIMESTAMP_OFFSET,
        TIMESTAMP_OFFSET + TIMESTAMP_LEN - 1,
    )
}

fn digits(stamp: &str, range: std::ops::Range<usize>) -> Result<u32> {
    stamp
        .get(range)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| QrError::InvalidTimestamp(format!("'{}' is not a digit timestamp", stamp)))
}

fn ist_to_unix(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<i64> {
    let naive: NaiveDateTime = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            QrError::InvalidTimestamp(format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02} is not a valid time",
                year, month, day, hour, minute, second
            ))
        })?;

    Ok(naive.and_utc().timestamp() - IST_OFFSET_SECS)
}

/// Unix seconds of a `YYYYMMDDHHMMSSmmm` IST stamp. Milliseconds are dropped.
pub fn parse_timestamp(stamp: &str) -> Result<i64> {
    if stamp.len() != TIMESTAMP_LEN {
        return Err(QrError::InvalidTimestamp(format!(
            "Expected {} digits, got '{}'",
            TIMESTAMP_LEN, stamp
        )));
    }
    digits(stamp, 14..17)?;

    ist_to_unix(
        digits(stamp, 0..4)?,
        digits(stamp, 4..6)?,
        digits(stamp, 6..8)?,
        digits(stamp, 8..10)?,
        digits(stamp, 10..12)?,
        digits(stamp, 12..14)?,
    )
}

/// The full 17-digit stamp stored in a record
pub fn read_timestamp(record: &[u8], layout: FrameLayout) -> Result<String> {
    let offset = layout.timestamp_offset();
    let bytes = record.get(offset..offset + TIMESTAMP_LEN).ok_or_else(|| {
        QrError::InvalidTimestamp(format!("Record of {} bytes has no timestamp", record.len()))
    })?;

    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(QrError::InvalidTimestamp("Timestamp bytes are not ASCII digits".to_string()));
    }
    Ok(String::from_utf8_lossy(bytes).to_string())
}

/// Issuance time of a record in Unix seconds, truncated to the hour.
///
/// Only `YYYYMMDDHH` is read, which is the precision the proof circuit exposes.
pub fn record_issue_time(record: &[u8], layout: FrameLayout) -> Result<i64> {
    let stamp = read_timestamp(record, layout)?;

    ist_to_unix(
        digits(&stamp, 0..4)?,
        digits(&stamp, 4..6)?,
        digits(&stamp, 6..8)?,
        digits(&stamp, 8..10)?,
        0,
        0,
    )
}

/// Unix seconds for a `DD-MM-YYYY` date field, taken as UTC midnight shifted forward to IST
pub fn date_to_unix(date: &str) -> Result<i64> {
    let parsed = if date.len() == 10 {
        NaiveDate::parse_from_str(date, "%d-%m-%Y").ok()
    } else {
        None
    };
    let parsed = parsed
        .ok_or_else(|| QrError::InvalidTimestamp(format!("'{}' is not a DD-MM-YYYY date", date)))?;

    let midnight = parsed.and_hms_opt(0, 0, 0).ok_or_else(|| {
        QrError::InvalidTimestamp(format!("'{}' has no midnight", date))
    })?;

    Ok(midnight.and_utc().timestamp() + IST_OFFSET_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_format_timestamp_shifts_to_ist() {
        let now = instant("2019-03-08T06:14:07.437Z");
        assert_eq!(format_timestamp(now), "20190308114407437");
    }

    #[test]
    fn test_format_timestamp_rolls_over_day() {
        let now = instant("2024-12-31T20:00:00Z");
        assert_eq!(format_timestamp(now), "20250101013000000");
    }

    #[test]
    fn test_format_timestamp_width() {
        for secs in [0i64, 1_000_000_000, 1_700_000_000, 4_000_000_000] {
            let stamp = format_timestamp(Utc.timestamp_opt(secs, 5_000_000).unwrap());
            assert_eq!(stamp.len(), TIMESTAMP_LEN);
            assert!(stamp.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_parse_timestamp_round_trip() {
        let now = instant("2025-11-23T02:13:51.915Z");
        let parsed = parse_timestamp(&format_timestamp(now)).unwrap();
        assert!((now.timestamp() - parsed).abs() <= 1);
        assert_eq!(parsed, now.timestamp());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("2019030811440743").is_err());
        assert!(parse_timestamp("2019030811440743x").is_err());
        assert!(parse_timestamp("20191308114407437").is_err());
        assert!(parse_timestamp("2019-03-0811:44:0").is_err());
    }

    #[test]
    fn test_restamp_record() {
        let record = b"3\xff269720190308114407437\xffSumit Kumar\xff".to_vec();
        let now = instant("2024-06-01T00:00:00Z");

        let out = restamp_record(&record, now).unwrap();
        assert_eq!(out.len(), record.len());
        assert_eq!(&out[..6], b"3\xff2697");
        assert_eq!(&out[6..23], b"20240601053000000");
        assert_eq!(&out[23..], b"\xffSumit Kumar\xff");
    }

    #[test]
    fn test_restamp_short_record() {
        let result = restamp_record(b"3\xff2697", Utc::now());
        assert!(matches!(result, Err(QrError::InvalidRange { .. })));
    }

    #[test]
    fn test_read_timestamp_by_layout() {
        let legacy = b"3\xff269720190308114407437\xff".to_vec();
        assert_eq!(read_timestamp(&legacy, FrameLayout::Legacy).unwrap(), "20190308114407437");

        let v2 = [b"V2\xff".as_slice(), legacy.as_slice()].concat();
        assert_eq!(read_timestamp(&v2, FrameLayout::V2).unwrap(), "20190308114407437");
        assert_ne!(read_timestamp(&v2, FrameLayout::Legacy).unwrap(), "20190308114407437");
        assert!(read_timestamp(b"3\xff2697", FrameLayout::Legacy).is_err());
    }

    #[test]
    fn test_record_issue_time_is_hourly() {
        let v2 = b"V2\xff3\xff269720190308114407437\xff".to_vec();
        let issued = record_issue_time(&v2, FrameLayout::V2).unwrap();
        // 2019-03-08 11:00 IST
        assert_eq!(issued, instant("2019-03-08T05:30:00Z").timestamp());
    }

    #[test]
    fn test_date_to_unix() {
        assert_eq!(date_to_unix("01-01-1970").unwrap(), IST_OFFSET_SECS);
        assert_eq!(
            date_to_unix("01-01-1984").unwrap(),
            instant("1984-01-01T00:00:00Z").timestamp() + IST_OFFSET_SECS
        );
        assert!(date_to_unix("1984-01-01").is_err());
        assert!(date_to_unix("30-02-1984").is_err());
    }
}
