//! src/routes/login/get.rs

use crate::error::DeskResult;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{Either, HttpResponse, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    flash_messages: Vec<String>,
}

pub async fn login_form(
    session: TypedSession,
    flash_messages: IncomingFlashMessages,
) -> DeskResult<Either<HttpResponse, impl Responder>> {
    // logged in users go straight to the dashboard
    if session.is_logged_in()? {
        return Ok(Either::Left(see_other("/admin")));
    }
    let flash_messages: Vec<String> = flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect();
    Ok(Either::Right(LoginTemplate { flash_messages }))
}
