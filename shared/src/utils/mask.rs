//! Partial redaction for sensitive response fields

/// Number of leading characters left visible by [`mask`]
const VISIBLE_PREFIX: usize = 3;

/// Mask character used for the redacted remainder
const MASK_CHAR: char = '*';

/// Partially redact a sensitive value (PIN, BVN)
///
/// Reveals the first three characters and replaces the remainder with
/// `*`. Empty or absent values pass through unchanged.
pub fn mask(value: Option<&str>) -> Option<String> {
    let value = value?;
    if value.is_empty() {
        return Some(String::new());
    }

    let masked: String = value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < VISIBLE_PREFIX { c } else { MASK_CHAR })
        .collect();
    Some(masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_reveals_fixed_prefix() {
        assert_eq!(mask(Some("12345678901")).unwrap(), "123********");
    }

    #[test]
    fn test_mask_short_value() {
        assert_eq!(mask(Some("12")).unwrap(), "12");
        assert_eq!(mask(Some("1234")).unwrap(), "123*");
    }

    #[test]
    fn test_mask_empty_passes_through() {
        assert_eq!(mask(Some("")).unwrap(), "");
        assert_eq!(mask(None), None);
    }
}
