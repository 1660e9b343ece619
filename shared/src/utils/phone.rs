//! Phone number utilities
//!
//! Phone numbers are stored and compared in one canonical digit format:
//! the country calling code followed by the subscriber number, no plus
//! sign and no separators (e.g. `2348031234567`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Country calling code applied during canonicalization
const COUNTRY_CALLING_CODE: &str = "234";

// Local subscriber number with a leading trunk zero (e.g. 08031234567)
static LOCAL_TRUNK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0\d{10}$").unwrap());

// Already canonical: country code followed by the 10-digit subscriber number
static CANONICAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^234\d{10}$").unwrap());

/// Strip formatting characters, keeping digits only
pub fn normalize(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Convert a phone number to the canonical digit format
///
/// Accepts the local trunk form (`0803...`), the bare subscriber number
/// (`803...`), a `+234`-prefixed international form, or an already
/// canonical value. Anything unrecognized is returned digit-stripped so
/// uniqueness comparisons stay deterministic.
pub fn canonicalize(phone: &str) -> String {
    let digits = normalize(phone);

    if CANONICAL_REGEX.is_match(&digits) {
        return digits;
    }
    if LOCAL_TRUNK_REGEX.is_match(&digits) {
        return format!("{}{}", COUNTRY_CALLING_CODE, &digits[1..]);
    }
    if digits.len() == 10 {
        return format!("{}{}", COUNTRY_CALLING_CODE, digits);
    }
    digits
}

/// Check whether a value is a plausible phone number after normalization
pub fn is_valid(phone: &str) -> bool {
    let canonical = canonicalize(phone);
    CANONICAL_REGEX.is_match(&canonical)
}
