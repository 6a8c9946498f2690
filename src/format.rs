use chrono::{DateTime, Locale, NaiveDate};

/// Formats a number of seconds as a zero padded `HH:MM:SS` string.
///
/// Hours are not wrapped, so anything past 99 hours simply grows the first field.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses an ISO date (`2021-01-08`) or date-time (`2021-01-08 16:51:00`, RFC 3339).
pub fn parse_published(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.date_naive());
    }

    // json-server fixtures commonly use a space separated date-time without offset.
    let date_part = raw.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// pt-BR `d MMM yy`, e.g. `8 jan 21`.
pub fn format_published(date: NaiveDate) -> String {
    date.format_localized("%-d %b %y", Locale::pt_BR).to_string()
}

/// pt-BR `EEE, d MMMM`, e.g. `qua, 19 outubro`. Used by the header.
pub fn format_today(date: NaiveDate) -> String {
    date.format_localized("%a, %-d %B", Locale::pt_BR).to_string()
}
