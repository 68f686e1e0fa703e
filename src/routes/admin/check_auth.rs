//! src/routes/admin/check_auth.rs

use crate::authentication::UserId;
use crate::domain::AuthStatus;
use crate::error::{DeskResult, Error};
use crate::session_state::{SessionError, TypedSession};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Tells the dashboard whether the current session is logged in, and as whom.
#[tracing::instrument(name = "Check authentication", skip_all)]
pub async fn check_auth(session: TypedSession, pool: web::Data<PgPool>) -> DeskResult<HttpResponse> {
    let Some(user_id) = session.get_user_id()? else {
        return Ok(HttpResponse::Unauthorized().json(AuthStatus::anonymous()));
    };
    if let Some(username) = session.get_username()? {
        return Ok(HttpResponse::Ok().json(AuthStatus::logged_in(username)));
    }
    // sessions without a cached name fall back to the users table
    match UserId::from(user_id).get_username(&pool).await {
        Ok(username) => {
            session.insert_username(&username)?;
            Ok(HttpResponse::Ok().json(AuthStatus::logged_in(username)))
        }
        Err(Error::SessionError(SessionError::UserNotFound)) => {
            Ok(HttpResponse::Unauthorized().json(AuthStatus::anonymous()))
        }
        Err(e) => Err(e),
    }
}
