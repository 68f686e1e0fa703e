//! src/session_state.rs

use crate::error::{error_chain_fmt, DeskResult, Error};
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum SessionError {
    #[error("The user has not logged in.")]
    UserNotLoggedIn,
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    SessionInsertError(#[from] actix_session::SessionInsertError),
    #[error(transparent)]
    SessionGetError(#[from] actix_session::SessionGetError),
}

impl std::fmt::Debug for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct TypedSession(Session);

impl TypedSession {
    const USER_ID_KEY: &'static str = "user_id";
    const USERNAME_KEY: &'static str = "username";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_user_id(&self, user_id: Uuid) -> DeskResult<()> {
        self.0
            .insert(Self::USER_ID_KEY, user_id)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    /// Remember the admin's name, so auth checks need no database round trip.
    pub fn insert_username(&self, username: &str) -> DeskResult<()> {
        self.0
            .insert(Self::USERNAME_KEY, username)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_username(&self) -> DeskResult<Option<String>> {
        self.0
            .get(Self::USERNAME_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_user_id(&self) -> DeskResult<Option<Uuid>> {
        self.0
            .get(Self::USER_ID_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn is_logged_in(&self) -> DeskResult<bool> {
        Ok(self.get_user_id()?.is_some())
    }

    pub fn log_out(self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // Same error as the `FromRequest` implementation of `Session`.
    type Error = <Session as FromRequest>::Error;
    // No I/O is performed, so the extractor resolves on first poll.
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
