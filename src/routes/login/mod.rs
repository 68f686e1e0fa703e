//! src/routes/login/mod.rs

mod get;
mod post;

pub use get::login_form;
pub use post::{login, LoginResponse};
