//! src/domain/booking.rs

use chrono::{DateTime, Utc};

/// Counters shown on top of the admin dashboard.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookingStats {
    pub total_bookings: i64,
    pub today_bookings: i64,
    pub pending_tests: i64,
}

/// One row of the recent bookings table.
#[derive(serde::Serialize, serde::Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub test_type: String,
    pub preferred_date: String,
    pub status: String,
}

#[derive(serde::Serialize, serde::Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct BookingDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub test_type: String,
    pub preferred_date: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /admin/check-auth`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl AuthStatus {
    pub fn logged_in(username: String) -> Self {
        Self {
            authenticated: true,
            username: Some(username),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
        }
    }
}
