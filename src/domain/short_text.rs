//! src/domain/short_text.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

/// Trimmed `s`, if it is not blank and fits a `VARCHAR(max_len)` column.
fn bounded(s: &str, max_len: usize) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty()
        || trimmed.graphemes(true).count() > max_len
        || trimmed.chars().count() > max_len
    {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Kind of test or service a customer books.
#[derive(Debug, Clone)]
pub struct TestType(String);

impl TestType {
    pub fn parse(s: String) -> Result<TestType, ValidationError> {
        bounded(&s, 50)
            .map(Self)
            .ok_or(ValidationError::InvalidTestType(s))
    }
}

impl AsRef<str> for TestType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Free-form date wish of the customer, e.g. `2024-03-01`.
#[derive(Debug, Clone)]
pub struct PreferredDate(String);

impl PreferredDate {
    pub fn parse(s: String) -> Result<PreferredDate, ValidationError> {
        bounded(&s, 50)
            .map(Self)
            .ok_or(ValidationError::InvalidPreferredDate(s))
    }
}

impl AsRef<str> for PreferredDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
