//! User Name Value Object
//!
//! The handle a participant logs in with. Identity is case-insensitive:
//! "Alice" and "alice" are the same user.
//!
//! ## Processing
//! - NFKC normalization, then trim
//! - `original` keeps the entered case (used for display)
//! - `canonical` is the lowercase form (used for matching)
//!
//! ## Invariants
//! - Non-empty after trimming
//! - At most `USER_NAME_MAX_LENGTH` characters
//! - No control characters

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("User name cannot contain control characters")]
    ControlCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize(input.as_ref());
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Matching key for an already-stored name, which may predate validation
    pub fn canonicalize(stored: &str) -> String {
        Self::normalize(stored).to_lowercase()
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(normalized: &str) -> Result<(), UserNameError> {
        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }
        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }
        if normalized.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }
        Ok(())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<&str> for UserName {
    type Error = UserNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let name = UserName::new("  Alice\t").unwrap();
            assert_eq!(name.original(), "Alice");
        }

        #[test]
        fn test_canonical_is_lowercase() {
            let name = UserName::new("AlIcE").unwrap();
            assert_eq!(name.original(), "AlIcE");
            assert_eq!(name.canonical(), "alice");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Fullwidth letters fold to ASCII
            let name = UserName::new("ＡＬＩＣＥ").unwrap();
            assert_eq!(name.canonical(), "alice");
        }

        #[test]
        fn test_inner_spaces_kept() {
            let name = UserName::new("Mary Ann").unwrap();
            assert_eq!(name.original(), "Mary Ann");
        }

        #[test]
        fn test_canonicalize_matches_new() {
            assert_eq!(
                UserName::canonicalize(" Bob "),
                UserName::new("BOB").unwrap().canonical()
            );
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert_eq!(UserName::new(""), Err(UserNameError::Empty));
            assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
        }

        #[test]
        fn test_maximum_length() {
            let at_limit = "a".repeat(USER_NAME_MAX_LENGTH);
            assert!(UserName::new(&at_limit).is_ok());

            let over = "a".repeat(USER_NAME_MAX_LENGTH + 1);
            assert_eq!(
                UserName::new(&over),
                Err(UserNameError::TooLong {
                    length: USER_NAME_MAX_LENGTH + 1,
                    max: USER_NAME_MAX_LENGTH
                })
            );
        }

        #[test]
        fn test_length_counts_chars_not_bytes() {
            let name = "é".repeat(USER_NAME_MAX_LENGTH);
            assert!(UserName::new(&name).is_ok());
        }

        #[test]
        fn test_control_character_fails() {
            assert_eq!(
                UserName::new("ali\u{0007}ce"),
                Err(UserNameError::ControlCharacter)
            );
        }
    }
}
