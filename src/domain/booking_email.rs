//! src/domain/booking_email.rs

use crate::domain::ValidationError;
use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct BookingEmail(String);

impl BookingEmail {
    pub fn parse(s: String) -> Result<BookingEmail, ValidationError> {
        let trimmed = s.trim();
        if trimmed.chars().count() <= 120 && trimmed.validate_email() {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::InvalidEmail(s))
        }
    }
}

impl AsRef<str> for BookingEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
