//! src/domain/phone_number.rs

use crate::domain::ValidationError;

#[derive(Debug, Clone)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts digits plus the usual separators, at most 20 characters.
    pub fn parse(s: String) -> Result<PhoneNumber, ValidationError> {
        let trimmed = s.trim();
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.' | '/');
        let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
        if has_digit && trimmed.chars().count() <= 20 && trimmed.chars().all(allowed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::InvalidPhone(s))
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
