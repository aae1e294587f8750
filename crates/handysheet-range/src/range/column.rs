//! Column letter notation.
//!
//! Columns are written in bijective base-26: there is no zero digit, so after
//! `Z` (26) comes `AA` (27), not `BA`. Indices here are 1-based, the same
//! numbers a literal range like `A1:C3` encodes.

use super::error::{RangeError, Result};

/// Convert a 1-based column index to letters (1 -> A, 26 -> Z, 27 -> AA).
///
/// Index 0 has no letter form and yields an empty string.
pub fn column_to_letters(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - rem - 1) / 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Convert column letters to a 1-based column index (A -> 1, AA -> 27).
///
/// Input is case-insensitive. Fails on empty input, anything other than
/// ASCII letters, or an index that does not fit in `u32`.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(RangeError::InvalidFormat(
            "empty column letters".to_string(),
        ));
    }

    let mut acc = 0u32;
    for c in letters.bytes() {
        if !c.is_ascii_alphabetic() {
            return Err(RangeError::InvalidFormat(format!(
                "invalid column letters: {letters}"
            )));
        }
        let digit = u32::from(c.to_ascii_uppercase() - b'A') + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| RangeError::InvalidFormat(format!("column out of range: {letters}")))?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_letters() {
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(26), "Z");
        assert_eq!(column_to_letters(27), "AA");
        assert_eq!(column_to_letters(28), "AB");
        assert_eq!(column_to_letters(52), "AZ");
        assert_eq!(column_to_letters(53), "BA");
        assert_eq!(column_to_letters(702), "ZZ");
        assert_eq!(column_to_letters(703), "AAA");
        assert_eq!(column_to_letters(18278), "ZZZ");
    }

    #[test]
    fn test_zero_has_no_letters() {
        assert_eq!(column_to_letters(0), "");
    }

    #[test]
    fn test_max_index_is_uppercase() {
        let letters = column_to_letters(u32::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(letters_to_column(&letters).unwrap(), u32::MAX);
    }

    #[test]
    fn test_letters_case_insensitive() {
        assert_eq!(letters_to_column("a").unwrap(), 1);
        assert_eq!(letters_to_column("A").unwrap(), 1);
        assert_eq!(letters_to_column("aB").unwrap(), 28);
    }

    #[test]
    fn test_letters_rejects_garbage() {
        assert!(matches!(letters_to_column(""), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(letters_to_column("1A"), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(letters_to_column("A B"), Err(RangeError::InvalidFormat(_))));
        assert!(matches!(letters_to_column("É"), Err(RangeError::InvalidFormat(_))));
    }

    #[test]
    fn test_letters_overflow() {
        let huge = "Z".repeat(40);
        assert!(matches!(letters_to_column(&huge), Err(RangeError::InvalidFormat(_))));
    }
}
