use chrono::{DateTime, NaiveDate};

/// Day/month/year, the format dates are presented in
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// ISO 8601 calendar date, the storage format
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a submitted calendar date.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` and RFC 3339 timestamps (keeping only
/// the date part).
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    NaiveDate::parse_from_str(input, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, DISPLAY_FORMAT))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
