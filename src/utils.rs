//! src/utils.rs

use actix_web::{http::header::LOCATION, HttpResponse};
use actix_web_flash_messages::FlashMessage;

/// forward to other location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Forward to `location`, which shows `message` once on its next load.
pub fn see_other_with_flash(message: FlashMessage, location: &str) -> HttpResponse {
    message.send();
    see_other(location)
}
