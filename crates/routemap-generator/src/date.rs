//! Date formatting for sitemap fields.

use chrono::{DateTime, SecondsFormat, Utc};
use routemap_core::DateValue;

/// Format an instant as ISO-8601 with millisecond precision, e.g.
/// `2025-06-02T10:20:30.000Z`.
pub fn to_iso_string(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a date to its sitemap string.
///
/// Missing or empty dates become the current time. Text is returned verbatim.
pub fn format_date(date: Option<&DateValue>) -> String {
    match date {
        Some(DateValue::Instant(instant)) => to_iso_string(instant),
        Some(DateValue::Text(text)) if !text.is_empty() => text.clone(),
        _ => to_iso_string(&Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_date_defaults_to_now() {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let formatted = format_date(None);
        // Midnight rollover between the two calls is tolerated.
        let after = Utc::now().format("%Y-%m-%d").to_string();
        assert!(formatted.starts_with(&today) || formatted.starts_with(&after));
        assert!(formatted.ends_with('Z'));
    }

    #[test]
    fn test_format_date_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 8, 5, 9).unwrap();
        assert_eq!(
            format_date(Some(&DateValue::Instant(instant))),
            "2024-03-01T08:05:09.000Z"
        );
    }

    #[test]
    fn test_format_date_text_verbatim() {
        let text = DateValue::from("2025-06-02T10:20:30Z");
        assert_eq!(format_date(Some(&text)), "2025-06-02T10:20:30Z");

        let loose = DateValue::from("last tuesday");
        assert_eq!(format_date(Some(&loose)), "last tuesday");
    }

    #[test]
    fn test_format_date_empty_text_is_now() {
        let formatted = format_date(Some(&DateValue::from("")));
        assert!(!formatted.is_empty());
        assert!(formatted.ends_with('Z'));
    }
}
