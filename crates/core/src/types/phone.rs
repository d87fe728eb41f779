//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number has too few digits.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// The number has too many digits.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
    /// The input contains characters other than digits, spaces, dashes,
    /// parentheses, or a leading `+`.
    #[error("phone number contains invalid characters")]
    InvalidCharacters,
}

/// A phone number, stored in a normalized form.
///
/// Formatting characters (spaces, dashes, parentheses) are stripped so the
/// same number entered two ways compares equal. A leading `+` is preserved.
///
/// ## Examples
///
/// ```
/// use pocket_bazaar_core::Phone;
///
/// let a = Phone::parse("+1 (555) 010-2345").unwrap();
/// let b = Phone::parse("+15550102345").unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits (ITU-T E.164 subscriber numbers).
    pub const MIN_DIGITS: usize = 7;

    /// Maximum number of digits (ITU-T E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits and common formatting, or has a digit count outside
    /// the E.164 range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut normalized = String::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0'..='9' => normalized.push(c),
                '+' if i == 0 => normalized.push(c),
                ' ' | '-' | '(' | ')' | '.' => {}
                _ => return Err(PhoneError::InvalidCharacters),
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("5550102345").is_ok());
        assert!(Phone::parse("+233 24 123 4567").is_ok());
        assert!(Phone::parse("(555) 010-2345").is_ok());
    }

    #[test]
    fn test_normalization_makes_formats_equal() {
        let a = Phone::parse("+1 (555) 010-2345").unwrap();
        let b = Phone::parse("+15550102345").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "+15550102345");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("12345"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert!(matches!(
            Phone::parse("555-CALL-NOW"),
            Err(PhoneError::InvalidCharacters)
        ));
        // + only allowed at the start
        assert!(matches!(
            Phone::parse("555+0102345"),
            Err(PhoneError::InvalidCharacters)
        ));
    }
}
