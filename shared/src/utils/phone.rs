//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// Optional leading "+" followed by 10 to 15 digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9]{10,15}$").expect("phone regex is valid")
});

/// A selectable country calling code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryDialCode {
    /// Display name
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    /// International dialling prefix including the leading "+"
    pub dial_code: &'static str,
}

/// Countries offered by the phone sign-in form, in display order
pub const COUNTRY_DIAL_CODES: &[CountryDialCode] = &[
    CountryDialCode { name: "United States", code: "US", dial_code: "+1" },
    CountryDialCode { name: "United Kingdom", code: "GB", dial_code: "+44" },
    CountryDialCode { name: "Canada", code: "CA", dial_code: "+1" },
    CountryDialCode { name: "Australia", code: "AU", dial_code: "+61" },
    CountryDialCode { name: "India", code: "IN", dial_code: "+91" },
    CountryDialCode { name: "China", code: "CN", dial_code: "+86" },
    CountryDialCode { name: "Japan", code: "JP", dial_code: "+81" },
    CountryDialCode { name: "Germany", code: "DE", dial_code: "+49" },
    CountryDialCode { name: "France", code: "FR", dial_code: "+33" },
    CountryDialCode { name: "Brazil", code: "BR", dial_code: "+55" },
    CountryDialCode { name: "Mexico", code: "MX", dial_code: "+52" },
    CountryDialCode { name: "Spain", code: "ES", dial_code: "+34" },
    CountryDialCode { name: "Italy", code: "IT", dial_code: "+39" },
    CountryDialCode { name: "South Korea", code: "KR", dial_code: "+82" },
    CountryDialCode { name: "Russia", code: "RU", dial_code: "+7" },
];

/// Look up a country by its ISO code (case-insensitive)
pub fn find_country(iso_code: &str) -> Option<&'static CountryDialCode> {
    COUNTRY_DIAL_CODES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(iso_code))
}

fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Check if a phone number is acceptable for sign-in
///
/// Spaces, dashes and parentheses are ignored; what remains must be an
/// optional "+" followed by 10 to 15 digits.
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_REGEX.is_match(&strip_formatting(phone))
}

/// Normalize a phone number to the `+<digits>` form used as a store key
pub fn normalize_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{}", digits)
}

/// Format digits for display while the user is typing
///
/// `4155552671` becomes `415-555-2671`; anything past ten digits is
/// appended as a fourth group.
pub fn format_phone_number_input(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        7..=10 => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}-{}-{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..10],
            &digits[10..]
        ),
    }
}

/// Combine a dial code (e.g. "+44") with a locally formatted number
pub fn combine_phone_number(dial_code: &str, phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}{}", dial_code, digits)
}

/// Mask a phone number for logs and display (e.g. +14****2671)
pub fn mask_phone_number(phone: &str) -> String {
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if cleaned.len() >= 7 {
        format!(
            "{}****{}",
            &cleaned[0..3],
            &cleaned[cleaned.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+1 (415) 555-2671"), "+14155552671");
        assert_eq!(normalize_phone_number("14155552671"), "+14155552671");
        assert_eq!(normalize_phone_number("+44 20 7183 8750"), "+442071838750");
    }

    #[test]
    fn test_is_valid_phone_number() {
        assert!(is_valid_phone_number("+14155552671"));
        assert!(is_valid_phone_number("+1 (415) 555-2671"));
        assert!(is_valid_phone_number("4155552671"));
        assert!(is_valid_phone_number("+861381234567890"));
        assert!(!is_valid_phone_number("+1415555")); // Too short
        assert!(!is_valid_phone_number("+8613812345678901")); // Too long
        assert!(!is_valid_phone_number("415555267a"));
        assert!(!is_valid_phone_number("++14155552671"));
        assert!(!is_valid_phone_number(""));
    }

    #[test]
    fn test_format_phone_number_input() {
        assert_eq!(format_phone_number_input(""), "");
        assert_eq!(format_phone_number_input("415"), "415");
        assert_eq!(format_phone_number_input("4155"), "415-5");
        assert_eq!(format_phone_number_input("4155552"), "415-555-2");
        assert_eq!(format_phone_number_input("(415) 555-2671"), "415-555-2671");
        assert_eq!(format_phone_number_input("415555267123"), "415-555-2671-23");
    }

    #[test]
    fn test_combine_phone_number() {
        assert_eq!(combine_phone_number("+1", "415-555-2671"), "+14155552671");
        assert_eq!(combine_phone_number("+44", "20 7183 8750"), "+442071838750");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+14155552671"), "+14****2671");
        assert_eq!(mask_phone_number("+86 138 1234 5678"), "+86****5678");
        assert_eq!(mask_phone_number("12345"), "****");
    }

    #[test]
    fn test_find_country() {
        assert_eq!(find_country("gb").map(|c| c.dial_code), Some("+44"));
        assert_eq!(find_country("KR").map(|c| c.name), Some("South Korea"));
        assert!(find_country("ZZ").is_none());
    }
}
