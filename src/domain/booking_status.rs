//! src/domain/booking_status.rs

use crate::domain::ValidationError;

/// Lifecycle state of a booking.
///
/// The set of states is open: besides the well-known values any short label
/// like `in progress` or `no-show` is accepted.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct BookingStatus(String);

impl BookingStatus {
    pub const PENDING: &'static str = "pending";
    pub const COMPLETED: &'static str = "completed";
    pub const CANCELLED: &'static str = "cancelled";

    pub fn parse(s: String) -> Result<BookingStatus, ValidationError> {
        let trimmed = s.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed.chars().count() <= 20
            && trimmed
                .chars()
                .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');
        if is_valid {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::InvalidStatus(s))
        }
    }

    pub fn pending() -> Self {
        Self(Self::PENDING.to_owned())
    }

    pub fn completed() -> Self {
        Self(Self::COMPLETED.to_owned())
    }

    pub fn cancelled() -> Self {
        Self(Self::CANCELLED.to_owned())
    }

    /// CSS class of the status badge, e.g. `status-pending` or `status-in-progress`.
    pub fn css_class(status: &str) -> String {
        let words: Vec<&str> = status.split_whitespace().collect();
        format!("status-{}", words.join("-").to_lowercase())
    }
}

impl AsRef<str> for BookingStatus {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_owned())
    }
}
