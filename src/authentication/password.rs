//! src/authentication/password.rs

use crate::error::error_chain_fmt;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

type CredsResult<T> = Result<T, CredentialsError>;

#[derive(thiserror::Error)]
pub enum CredentialsError {
    #[error("Username could not be found.")]
    UnknownUsername,
    #[error("Failed to verify password.")]
    PasswordVerificationFailed(#[from] argon2::password_hash::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, pool))]
pub async fn validate_credentials(credentials: Credentials, pool: &PgPool) -> CredsResult<Uuid> {
    let mut user_id: Option<Uuid> = None;
    // fallback hash, verified for unknown usernames as well
    let mut expected_password_hash = Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    );
    if let Some((stored_user_id, stored_password_hash)) =
        get_stored_credentials(&credentials.username, pool).await?
    {
        user_id = Some(stored_user_id);
        expected_password_hash = stored_password_hash;
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;
    // user_id is only set to Some, if we found credentials in database
    user_id.ok_or(CredentialsError::UnknownUsername)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> CredsResult<()> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;
    Argon2::default().verify_password(
        password_candidate.expose_secret().as_bytes(),
        &expected_password_hash,
    )?;
    Ok(())
}

#[tracing::instrument(name = "Get stored credentials", skip(username, pool))]
async fn get_stored_credentials(
    username: &str,
    pool: &PgPool,
) -> CredsResult<Option<(Uuid, Secret<String>)>> {
    let row: Option<(Uuid, String)> = sqlx::query_as(
        r#"
        SELECT user_id, password_hash
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?;
    Ok(row.map(|(user_id, password_hash)| (user_id, Secret::new(password_hash))))
}

pub fn compute_password_hash(password: Secret<String>) -> CredsResult<Secret<String>> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15_000, 2, 1, None).context("Invalid Argon2 parameters.")?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .context("Failed to hash password.")?
        .to_string();
    Ok(Secret::new(password_hash))
}

/// Create the configured admin account, unless a user with this name exists.
///
/// Returns `true` if a new user has been stored.
#[tracing::instrument(name = "Ensure admin user", skip(password, pool))]
pub async fn ensure_admin_user(
    username: &str,
    password: Secret<String>,
    pool: &PgPool,
) -> CredsResult<bool> {
    if get_stored_credentials(username, pool).await?.is_some() {
        return Ok(false);
    }
    let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn computation of password hash")??;
    let inserted = sqlx::query(
        r#"
        INSERT INTO users (user_id, username, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash.expose_secret())
    .execute(pool)
    .await
    .context("Failed to store the admin user in the database.")?
    .rows_affected();
    if inserted > 0 {
        tracing::info!("Admin user created");
    }
    Ok(inserted > 0)
}
