//! src/dashboard/view.rs

use crate::domain::{BookingDetail, BookingStats, BookingStatus, BookingSummary};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Handle of an error banner, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(pub u64);

/// Everything the dashboard controller needs from the surface it draws on.
///
/// Implementations own their presentation state; the controller never reads
/// it back. All methods are called from async tasks and must not block for
/// long, except `confirm`, which waits for the operator.
pub trait DashboardView: Send + Sync + 'static {
    /// Set the three counters.
    fn render_stats(&self, stats: &BookingStats);
    /// Replace the whole bookings table with `rows`.
    fn replace_bookings(&self, rows: &[BookingRow]);
    fn show_booking(&self, booking: &BookingDetailView);
    /// Show a transient error banner.
    fn show_error(&self, message: &str) -> BannerId;
    fn remove_error(&self, banner: BannerId);
    /// Leave the dashboard for `location`, e.g. `/` after the session expired.
    fn navigate(&self, location: &str);
    /// Ask the operator a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;
}

/// A row of the recent bookings table, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRow {
    pub id: i64,
    pub created_at: String,
    pub name: String,
    pub test_type: String,
    pub phone: String,
    pub status: String,
    pub status_class: String,
}

impl From<&BookingSummary> for BookingRow {
    fn from(booking: &BookingSummary) -> Self {
        Self {
            id: booking.id,
            created_at: format_date(&booking.created_at),
            name: booking.name.clone(),
            test_type: booking.test_type.clone(),
            phone: booking.phone.clone(),
            status: booking.status.clone(),
            status_class: BookingStatus::css_class(&booking.status),
        }
    }
}

/// Booking details as shown in the detail dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetailView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub test_type: String,
    pub preferred_date: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl From<&BookingDetail> for BookingDetailView {
    fn from(booking: &BookingDetail) -> Self {
        let message = match booking.message.as_deref() {
            Some(m) if !m.is_empty() => m.to_owned(),
            _ => "N/A".to_owned(),
        };
        Self {
            id: booking.id,
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            test_type: booking.test_type.clone(),
            preferred_date: format_date_str(&booking.preferred_date),
            message,
            status: booking.status.clone(),
            created_at: format_date(&booking.created_at),
        }
    }
}

const DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// `Jan 5, 2024, 02:30 PM`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Like `format_date` for free-form input; unparseable input is returned as is.
pub fn format_date_str(date: &str) -> String {
    let trimmed = date.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(trimmed) {
        return format_date(&d.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return d.format(DATE_FORMAT).to_string();
        }
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => d.and_time(chrono::NaiveTime::MIN).format(DATE_FORMAT).to_string(),
        Err(_) => date.to_owned(),
    }
}
