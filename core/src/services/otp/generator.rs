//! Passcode generator

use rand::Rng;

/// Generates a random numeric code of `length` digits.
///
/// Codes are drawn uniformly from `[10^(length-1), 10^length - 1]`, so the
/// first digit is never zero - the 100000-999999 convention for the
/// default length of 6.
pub fn generate_code(length: usize) -> String {
    debug_assert!((1..=18).contains(&length));
    let lower = 10u64.pow(length as u32 - 1);
    let upper = 10u64.pow(length as u32);
    let code = rand::thread_rng().gen_range(lower..upper);
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn code_has_requested_length_and_only_digits() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn code_never_has_a_leading_zero() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert_ne!(code.as_bytes()[0], b'0');
            let value: u64 = code.parse().unwrap();
            assert!((100_000..1_000_000).contains(&value));
        }
    }

    #[test]
    fn other_lengths_are_supported() {
        assert_eq!(generate_code(4).len(), 4);
        assert_eq!(generate_code(8).len(), 8);
    }

    #[test]
    fn codes_vary() {
        let codes: HashSet<String> = (0..100).map(|_| generate_code(6)).collect();
        assert!(codes.len() > 1);
    }
}
