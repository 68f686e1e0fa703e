//! src/startup.rs

use crate::authentication::{ensure_admin_user, redirect_anonymous_users, reject_anonymous_users};
use crate::configuration::{AdminSettings, DatabaseSettings, Settings};
use crate::error::{DeskResult, Error};
use crate::routes::{
    admin_dashboard, book_test, booking_detail, check_auth, export_bookings, health_check, home,
    log_out, login, login_form, not_found, recent_bookings, stats, update_booking_status,
};
use actix_session::storage::RedisSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Number of bookings listed by the recent bookings endpoint and the dashboard page.
pub struct RecentBookingsLimit(pub u16);

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> DeskResult<Self> {
        let connection_pool = get_connection_pool(&configuration.database);
        bootstrap_admin(&connection_pool, &configuration.admin).await?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).context("Failed to bind address.")?;
        let port = listener
            .local_addr()
            .context("Failed to read local address of listener.")?
            .port();
        let server = run(
            listener,
            connection_pool,
            configuration.application.hmac_secret,
            configuration.redis_uri,
            configuration.application.recent_bookings_limit,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

async fn bootstrap_admin(pool: &PgPool, admin: &AdminSettings) -> DeskResult<()> {
    ensure_admin_user(&admin.username, admin.password.clone(), pool).await?;
    Ok(())
}

/// Malformed JSON bodies are answered like every other invalid input.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match err {
            actix_web::error::JsonPayloadError::ContentType => {
                "Content-Type must be application/json".to_string()
            }
            other => format!("Invalid JSON body: {}", other),
        };
        Error::PayloadError(message).into()
    })
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    hmac_secret: Secret<String>,
    redis_uri: Secret<String>,
    recent_bookings_limit: u16,
) -> DeskResult<Server> {
    let db_pool = web::Data::new(db_pool);
    let recent_bookings_limit = web::Data::new(RecentBookingsLimit(recent_bookings_limit));
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let redis_store = RedisSessionStore::new(redis_uri.expose_secret())
        .await
        .context("Failed to connect to the redis session store.")?;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                redis_store.clone(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/api/book", web::post().to(book_test))
            .route("/admin/login", web::get().to(login_form))
            .route("/admin/login", web::post().to(login))
            .route("/admin/check-auth", web::get().to(check_auth))
            .service(
                web::scope("/api/admin")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/stats", web::get().to(stats))
                    .route("/recent-bookings", web::get().to(recent_bookings))
                    .route("/booking/{id}", web::get().to(booking_detail))
                    .route("/booking/{id}/status", web::post().to(update_booking_status))
                    .route("/export", web::get().to(export_bookings)),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(redirect_anonymous_users))
                    .route("", web::get().to(admin_dashboard))
                    .route("/logout", web::get().to(log_out)),
            )
            .default_service(web::to(not_found))
            .app_data(db_pool.clone())
            .app_data(recent_bookings_limit.clone())
    })
    .listen(listener)
    .context("Failed to listen on TCP listener.")?
    .run();
    Ok(server)
}
