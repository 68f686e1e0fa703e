//! src/error.rs

use crate::authentication::CredentialsError;
use crate::domain::ValidationError;
use crate::session_state::SessionError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

pub type DeskResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// JSON body of every error response: `{"error": "..."}`
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("{0}")]
    PayloadError(String),
    #[error("Invalid username or password")]
    AuthError(#[source] anyhow::Error),
    #[error(transparent)]
    SessionError(#[from] SessionError),
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::PayloadError(_) => StatusCode::BAD_REQUEST,
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            Error::SessionError(SessionError::UserNotLoggedIn)
            | Error::SessionError(SessionError::UserNotFound) => StatusCode::UNAUTHORIZED,
            Error::SessionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // never leak the cause chain of internal failures to the client
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error })
    }
}

impl From<CredentialsError> for Error {
    fn from(value: CredentialsError) -> Self {
        match value {
            CredentialsError::UnexpectedError(err) => Error::UnexpectedError(err),
            other => Error::AuthError(other.into()),
        }
    }
}
