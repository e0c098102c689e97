//! Display formatting for sizes and timestamps

use crate::types::Timestamp;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Bytes as kilobytes with two decimals (`"2.00 KB"`)
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / KIB)
}

/// Bytes as megabytes with two decimals (`"1.00 MB"`)
pub fn format_mb(bytes: u64) -> String {
    format_mb_value(bytes as f64 / MIB)
}

/// A value already expressed in megabytes
pub fn format_mb_value(mb: f64) -> String {
    format!("{:.2} MB", mb)
}

/// Full local date and time, or `fallback` when absent
pub fn format_timestamp(ts: Option<&Timestamp>, fallback: &str) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => fallback.to_string(),
    }
}

/// Wall-clock time only, for log lines
pub fn format_clock(ts: Option<&Timestamp>) -> String {
    match ts {
        Some(ts) => ts.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;

    #[test]
    fn test_format_mb_one_mebibyte() {
        assert_eq!(format_mb(1_048_576), "1.00 MB");
        assert_eq!(format_mb(0), "0.00 MB");
    }

    #[test]
    fn test_format_kb_rounds_to_two_decimals() {
        assert_eq!(format_kb(2048), "2.00 KB");
        assert_eq!(format_kb(1536), "1.50 KB");
        assert_eq!(format_kb(1000), "0.98 KB");
    }

    #[test]
    fn test_format_mb_value() {
        assert_eq!(format_mb_value(3.14159), "3.14 MB");
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp(None, "Never"), "Never");

        let ts = parse_timestamp("2024-05-01T08:05:09").unwrap();
        assert_eq!(format_timestamp(Some(&ts), "Never"), "2024-05-01 08:05:09");
        assert_eq!(format_clock(Some(&ts)), "08:05:09");
    }
}
