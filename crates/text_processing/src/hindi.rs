//! Hindi Language Utilities

use std::borrow::Cow;

/// Map a Devanagari digit (०-९) to its ASCII counterpart
pub fn digit_to_ascii(c: char) -> Option<char> {
    match c {
        '०' => Some('0'),
        '१' => Some('1'),
        '२' => Some('2'),
        '३' => Some('3'),
        '४' => Some('4'),
        '५' => Some('5'),
        '६' => Some('6'),
        '७' => Some('7'),
        '८' => Some('8'),
        '९' => Some('9'),
        _ => None,
    }
}

/// Replace Devanagari digits with ASCII digits
///
/// Borrows the input unchanged when there is nothing to replace.
///
/// # Examples
/// ```
/// use agro_advisor_text_processing::hindi::normalize_digits;
/// assert_eq!(normalize_digits("pH ६.५ है"), "pH 6.5 है");
/// assert_eq!(normalize_digits("pH 7"), "pH 7");
/// ```
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| digit_to_ascii(c).is_some()) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|c| digit_to_ascii(c).unwrap_or(c))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits() {
        assert_eq!(normalize_digits("०१२३४५६७८९"), "0123456789");
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(normalize_digits("मेरा pH ५.५ है"), "मेरा pH 5.5 है");
    }

    #[test]
    fn test_borrowed_when_unchanged() {
        assert!(matches!(normalize_digits("pH 6.5"), Cow::Borrowed(_)));
        assert!(matches!(normalize_digits("धान"), Cow::Borrowed(_)));
    }
}
