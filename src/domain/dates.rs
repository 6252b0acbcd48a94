use chrono::NaiveDate;

/// Calendar dates travel as fixed-width, zero-padded `YYYY-MM-DD` strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true when `value` is a real calendar date in `YYYY-MM-DD` form.
///
/// The shape is checked before parsing so that lexical comparison of any two
/// accepted values equals chronological comparison.
pub fn is_calendar_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_only = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    digits_only && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}
