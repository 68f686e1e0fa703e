//! src/routes/mod.rs

mod admin;
mod bookings;
mod health_check;
mod home;
mod login;
mod not_found;

pub use admin::*;
pub use bookings::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
pub use not_found::*;
