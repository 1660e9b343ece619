//! Text transforms applied during request normalization

use chrono::NaiveDate;

/// Title-case a free-text field (`"jane DOE"` -> `"Jane Doe"`)
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce a `"YYYY-MM-DD ..."`-shaped string to a strict date
///
/// Clients submit dates with a trailing time component; only the date
/// part is kept. Returns `None` when the leading token is not a valid
/// calendar date.
pub fn strict_date(value: &str) -> Option<NaiveDate> {
    let head = value.split_whitespace().next()?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}
