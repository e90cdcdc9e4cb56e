use chrono::{DateTime, SecondsFormat, Utc};

/// SP-API expects ISO-8601 timestamps in UTC with a `Z` suffix.
pub fn sp_api_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
