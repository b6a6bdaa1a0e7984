//! Phone number normalization and masking utilities
//!
//! Subjects are identified by a normalized phone number: a leading `+`
//! followed by 10 to 15 digits. Normalization strips every non-digit
//! character from the raw input (including any `+`) and re-applies the
//! prefix, so it is idempotent by construction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum digit count for a normalized subject
pub const MIN_PHONE_DIGITS: usize = 10;

/// Maximum digit count for a normalized subject
pub const MAX_PHONE_DIGITS: usize = 15;

/// Regular expression for an already-normalized subject
static NORMALIZED_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{10,15}$").unwrap());

/// Strip every non-digit character from a raw phone number.
pub fn clean_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a raw phone number to `+<digits>` form.
///
/// Returns `None` when the cleaned digit count falls outside
/// [`MIN_PHONE_DIGITS`, `MAX_PHONE_DIGITS`].
///
/// # Examples
///
/// ```
/// use ce_shared::utils::phone::normalize_phone;
///
/// assert_eq!(normalize_phone("987-654-3210").as_deref(), Some("+9876543210"));
/// assert_eq!(normalize_phone("+9876543210").as_deref(), Some("+9876543210"));
/// assert_eq!(normalize_phone("12345"), None);
/// ```
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = clean_phone(raw);
    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        Some(format!("+{}", digits))
    } else {
        None
    }
}

/// Check whether a phone number is already in normalized form.
pub fn is_normalized(phone: &str) -> bool {
    NORMALIZED_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logging (show only the last 4 digits).
pub fn mask_phone(phone: &str) -> String {
    if phone.len() <= 4 {
        return "*".repeat(phone.len());
    }
    format!("***{}", &phone[phone.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting_characters() {
        assert_eq!(
            normalize_phone("(987) 654-3210").as_deref(),
            Some("+9876543210")
        );
        assert_eq!(
            normalize_phone("+44 7123 456 789").as_deref(),
            Some("+447123456789")
        );
    }

    #[test]
    fn rejects_out_of_range_digit_counts() {
        assert_eq!(normalize_phone("123456789"), None); // 9 digits
        assert_eq!(normalize_phone("1234567890123456"), None); // 16 digits
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("not a number"), None);
    }

    #[test]
    fn boundary_digit_counts_are_accepted() {
        assert_eq!(normalize_phone("1234567890").as_deref(), Some("+1234567890"));
        assert_eq!(
            normalize_phone("123456789012345").as_deref(),
            Some("+123456789012345")
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["9876543210", "+9876543210", "98 76 54 32 10", "(44) 7123-456-789"] {
            let once = normalize_phone(raw).unwrap();
            let twice = normalize_phone(&once).unwrap();
            assert_eq!(once, twice);
            assert!(is_normalized(&once));
        }
    }

    #[test]
    fn mask_keeps_last_four_digits() {
        assert_eq!(mask_phone("+9876543210"), "***3210");
        assert_eq!(mask_phone("+123"), "****");
        assert_eq!(mask_phone("12"), "**");
    }
}
