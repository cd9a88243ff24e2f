//! CPF (Brazilian national identifier) helpers.

use crate::constants::CPF_LENGTH;

/// Input-formatting helper: keep only digits, at most 11 of them.
pub fn format_cpf(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CPF_LENGTH)
        .collect()
}

/// Strip the punctuation a CPF is usually written with (`123.456.789-00`).
///
/// Anything else, letters included, is kept so that validation can reject it.
pub fn normalize_cpf(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/') && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cpf_strips_and_truncates() {
        assert_eq!(format_cpf("123.456.789-00extra"), "12345678900");
        assert_eq!(format_cpf("123.456.789-0099"), "12345678900");
        assert_eq!(format_cpf("abc"), "");
        assert_eq!(format_cpf("12 34"), "1234");
    }

    #[test]
    fn test_normalize_cpf_keeps_letters() {
        assert_eq!(normalize_cpf("123.456.789-00"), "12345678900");
        assert_eq!(normalize_cpf(" 123 456 789/00 "), "12345678900");
        assert_eq!(normalize_cpf("123.456.789-0a"), "1234567890a");
    }
}
