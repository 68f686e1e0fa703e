//! src/lib.rs

pub mod authentication;
pub mod configuration;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod telemetry;
pub mod utils;
