//! src/dashboard/mod.rs
//!
//! Admin dashboard controller: polls the admin API and renders the results
//! into a [`DashboardView`].

mod client;
mod console;
mod controller;
mod view;

pub use client::{AdminClient, ApiError, EXPORT_PATH};
pub use console::{Command, CommandError, ConsoleView};
pub use controller::{
    Dashboard, DEFAULT_BANNER_LIFETIME, DEFAULT_REFRESH_INTERVAL, LOGIN_LOCATION,
};
pub use view::{
    format_date, format_date_str, BannerId, BookingDetailView, BookingRow, DashboardView,
};
