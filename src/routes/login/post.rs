//! src/routes/login/post.rs

use crate::authentication::{validate_credentials, Credentials};
use crate::domain::ValidationError;
use crate::error::{DeskResult, Error};
use crate::session_state::TypedSession;
use crate::utils::{see_other, see_other_with_flash};
use actix_web::{web, Either, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct LoginData {
    username: Option<String>,
    password: Option<Secret<String>>,
}

impl TryFrom<LoginData> for Credentials {
    type Error = ValidationError;

    fn try_from(value: LoginData) -> Result<Self, Self::Error> {
        match value {
            LoginData {
                username: Some(username),
                password: Some(password),
            } => Ok(Credentials { username, password }),
            _ => Err(ValidationError::MissingCredentials),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub redirect: String,
}

/// Log in with a JSON body (API clients) or an url-encoded form (login page).
#[tracing::instrument(
    skip(body, pool, session),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    body: Either<web::Json<LoginData>, web::Form<LoginData>>,
    pool: web::Data<PgPool>,
    session: TypedSession,
) -> DeskResult<HttpResponse> {
    match body {
        Either::Left(json) => {
            let credentials = Credentials::try_from(json.into_inner()).map_err(|e| {
                tracing::error!("Login attempt failed: missing required fields");
                e
            })?;
            authenticate(credentials, &pool, &session).await?;
            Ok(HttpResponse::Ok().json(LoginResponse {
                message: "Login successful".into(),
                redirect: "/admin".into(),
            }))
        }
        Either::Right(form) => {
            let result = match Credentials::try_from(form.into_inner()) {
                Ok(credentials) => authenticate(credentials, &pool, &session).await,
                Err(e) => Err(e.into()),
            };
            match result {
                Ok(_) => Ok(see_other("/admin")),
                Err(Error::UnexpectedError(e)) => Err(Error::UnexpectedError(e)),
                Err(e) => Ok(login_redirect(e)),
            }
        }
    }
}

async fn authenticate(
    credentials: Credentials,
    pool: &PgPool,
    session: &TypedSession,
) -> DeskResult<Uuid> {
    let username = credentials.username.clone();
    tracing::Span::current().record("username", &tracing::field::display(&username));
    match validate_credentials(credentials, pool).await {
        Ok(user_id) => {
            tracing::Span::current().record("user_id", &tracing::field::display(&user_id));
            session.renew();
            session.insert_user_id(user_id)?;
            session.insert_username(&username)?;
            tracing::info!("Successful login");
            Ok(user_id)
        }
        Err(e) => {
            let e = Error::from(e);
            if matches!(e, Error::AuthError(_)) {
                tracing::warn!("Failed login attempt");
            }
            Err(e)
        }
    }
}

fn login_redirect(e: Error) -> HttpResponse {
    see_other_with_flash(FlashMessage::error(e.to_string()), "/admin/login")
}
