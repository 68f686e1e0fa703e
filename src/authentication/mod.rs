//! src/authentication/mod.rs

mod middleware;
mod password;

pub use middleware::{redirect_anonymous_users, reject_anonymous_users, UserId};
pub use password::{ensure_admin_user, validate_credentials, Credentials, CredentialsError};
