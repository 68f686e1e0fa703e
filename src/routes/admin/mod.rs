//! src/routes/admin/mod.rs

mod bookings;
mod check_auth;
mod dashboard;
mod export;
mod logout;
mod stats;

pub use bookings::*;
pub use check_auth::check_auth;
pub use dashboard::admin_dashboard;
pub use export::*;
pub use logout::log_out;
pub use stats::*;
