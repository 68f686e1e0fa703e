//! src/routes/not_found.rs

use crate::error::Error;

/// Fallback for every unknown path.
pub async fn not_found() -> Result<actix_web::HttpResponse, Error> {
    Err(Error::NotFound)
}
