//! src/domain/new_booking.rs

use crate::domain::{
    BookingEmail, BookingName, PhoneNumber, PreferredDate, TestType, ValidationError,
};

/// JSON body of `POST /api/book`.
#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub test_type: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct NewBooking {
    pub name: BookingName,
    pub email: BookingEmail,
    pub phone: PhoneNumber,
    pub test_type: TestType,
    pub preferred_date: PreferredDate,
    pub message: Option<String>,
}

/// Takes a required field, treating empty strings as missing.
fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

impl TryFrom<BookingRequest> for NewBooking {
    type Error = ValidationError;

    fn try_from(value: BookingRequest) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let name = required(value.name, "name", &mut missing);
        let email = required(value.email, "email", &mut missing);
        let phone = required(value.phone, "phone", &mut missing);
        let test_type = required(value.test_type, "testType", &mut missing);
        let preferred_date = required(value.preferred_date, "preferredDate", &mut missing);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(Self {
            name: BookingName::parse(name)?,
            email: BookingEmail::parse(email)?,
            phone: PhoneNumber::parse(phone)?,
            test_type: TestType::parse(test_type)?,
            preferred_date: PreferredDate::parse(preferred_date)?,
            message: value.message.filter(|m| !m.trim().is_empty()),
        })
    }
}
