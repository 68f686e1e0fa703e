//! src/domain/booking_name.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct BookingName(String);

impl BookingName {
    /// Returns an instance of `BookingName` if the input satisfies all
    /// our validation constraints on customer names.
    pub fn parse(s: String) -> Result<BookingName, ValidationError> {
        let trimmed = s.trim();
        let is_empty_or_whitespace = trimmed.is_empty();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters
        // (`a` and `̊`).
        // The column holds 100 characters, so both counts are bounded.
        let is_too_long =
            trimmed.graphemes(true).count() > 100 || trimmed.chars().count() > 100;
        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = trimmed.chars().any(|g| forbidden_characters.contains(&g));
        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(ValidationError::InvalidName(s))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for BookingName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
