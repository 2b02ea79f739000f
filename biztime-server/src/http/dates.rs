//! Timestamp renderings used in response bodies

use chrono::{DateTime, SecondsFormat, Utc};

/// IMF-fixdate, as used in HTTP `Date` headers.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// UTC with millisecond precision and a `Z` suffix, e.g. `2026-10-19T09:05:07.000Z`.
pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render a timestamp as an HTTP date, e.g. `Mon, 19 Oct 2026 12:30:00 GMT`.
pub fn http_date(ts: DateTime<Utc>) -> String {
    ts.format(HTTP_DATE_FORMAT).to_string()
}
