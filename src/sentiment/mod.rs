//! Synthetic sentiment data
//!
//! Everything in a report is derived from the symbol and a single clock reading;
//! there is no real analysis behind it.

mod report;

use chrono::{Local, NaiveDateTime, Timelike};

pub use report::SentimentReport;

/// Build the report for `symbol` stamped with the current local time
pub fn analyze(symbol: &str) -> SentimentReport {
    SentimentReport::mock(symbol, Local::now().naive_local())
}

/// ISO-8601 local timestamp without offset, `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
///
/// Microseconds are printed only when non-zero.
pub fn isoformat(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_isoformat_with_micros() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 6)
            .unwrap();
        assert_eq!(isoformat(&ts), "2025-01-02T03:04:05.000006");
    }

    #[test]
    fn test_isoformat_whole_second() {
        let ts = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(isoformat(&ts), "2025-12-31T23:59:59");
    }

    #[test]
    fn test_analyze_uses_one_clock_reading() {
        let report = analyze("USDCHF");
        assert_eq!(report.symbol, "USDCHF");
        assert_eq!(report.timestamp, report.sentiment_analysis.analysis_timestamp);
        assert_eq!(report.timestamp, report.sources.reddit.items[0].created_at);
        assert_eq!(report.timestamp, report.sources.news.items[0].published);
    }
}
