//! src/authentication/middleware.rs

use crate::error::{DeskResult, Error};
use crate::session_state::{SessionError, TypedSession};
use crate::utils::see_other;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    FromRequest, HttpMessage,
};
use actix_web_lab::middleware::Next;
use anyhow::Context;
use sqlx::PgPool;
use std::ops::Deref;
use uuid::Uuid;

async fn session_user_id(req: &mut ServiceRequest) -> Result<Option<Uuid>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;
    Ok(session.get_user_id()?)
}

/// Guard of the JSON admin API: anonymous requests get a `401`.
pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    match session_user_id(&mut req).await? {
        Some(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            next.call(req).await
        }
        None => Err(actix_web::Error::from(Error::from(
            SessionError::UserNotLoggedIn,
        ))),
    }
}

/// Guard of the admin pages: anonymous requests are sent to the login page.
pub async fn redirect_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    match session_user_id(&mut req).await? {
        Some(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            Ok(next.call(req).await?.map_into_left_body())
        }
        None => {
            let (request, _) = req.into_parts();
            let response = see_other("/admin/login");
            Ok(ServiceResponse::new(request, response).map_into_right_body())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl UserId {
    #[tracing::instrument(name = "Get username from UserID", skip(pool))]
    pub async fn get_username(&self, pool: &PgPool) -> DeskResult<String> {
        let username: Option<String> = sqlx::query_scalar(
            r#"
            SELECT username
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(self.0)
        .fetch_optional(pool)
        .await
        .context("Failed to perform query to retrieve a username.")?;
        let username = username.ok_or(SessionError::UserNotFound)?;
        Ok(username)
    }
}
