//! src/domain/mod.rs

mod booking;
mod booking_email;
mod booking_name;
mod booking_status;
mod new_booking;
mod phone_number;
mod short_text;

pub use booking::{AuthStatus, BookingDetail, BookingStats, BookingSummary};
pub use booking_email::BookingEmail;
pub use booking_name::BookingName;
pub use booking_status::BookingStatus;
pub use new_booking::{BookingRequest, NewBooking};
pub use phone_number::PhoneNumber;
pub use short_text::{PreferredDate, TestType};

/// Validation error for domain data
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("`{0}` is not a valid name.")]
    InvalidName(String),
    #[error("`{0}` is not a valid email.")]
    InvalidEmail(String),
    #[error("`{0}` is not a valid phone number.")]
    InvalidPhone(String),
    #[error("`{0}` is not a valid test type.")]
    InvalidTestType(String),
    #[error("`{0}` is not a valid preferred date.")]
    InvalidPreferredDate(String),
    #[error("Status is required")]
    MissingStatus,
    #[error("`{0}` is not a valid booking status.")]
    InvalidStatus(String),
    #[error("Username and password are required")]
    MissingCredentials,
}
