//! src/routes/admin/logout.rs

use crate::authentication::UserId;
use crate::error::DeskResult;
use crate::session_state::TypedSession;
use crate::utils::see_other_with_flash;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

#[tracing::instrument(name = "Log out", skip_all)]
pub async fn log_out(session: TypedSession, user_id: web::ReqData<UserId>) -> DeskResult<HttpResponse> {
    session.log_out();
    tracing::info!(user_id = %user_id.into_inner(), "User logged out");
    Ok(see_other_with_flash(
        FlashMessage::info("You have successfully logged out."),
        "/",
    ))
}
