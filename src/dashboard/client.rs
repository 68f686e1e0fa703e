//! src/dashboard/client.rs

use crate::domain::{AuthStatus, BookingDetail, BookingStats, BookingStatus, BookingSummary};
use crate::error::error_chain_fmt;
use anyhow::Context;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const EXPORT_PATH: &str = "/api/admin/export";

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("The session is not authenticated.")]
    Unauthorized,
    #[error("The server answered with status {0}.")]
    Status(StatusCode),
    #[error("Failed to perform request.")]
    Request(#[from] reqwest::Error),
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// HTTP client of the admin API. Keeps the session cookie between calls.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http_client: Client,
    base_url: String,
}

impl AdminClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .context("Failed to build http client.")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[tracing::instrument(name = "Log in to admin API", skip(self, password))]
    pub async fn login(&self, username: &str, password: &Secret<String>) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "username": username,
            "password": password.expose_secret(),
        });
        let response = self
            .http_client
            .post(self.url("/admin/login"))
            .json(&body)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    #[tracing::instrument(name = "Check authentication", skip(self))]
    pub async fn check_auth(&self) -> Result<AuthStatus, ApiError> {
        self.get_json("/admin/check-auth").await
    }

    #[tracing::instrument(name = "Fetch booking stats", skip(self))]
    pub async fn stats(&self) -> Result<BookingStats, ApiError> {
        self.get_json("/api/admin/stats").await
    }

    #[tracing::instrument(name = "Fetch recent bookings", skip(self))]
    pub async fn recent_bookings(&self) -> Result<Vec<BookingSummary>, ApiError> {
        self.get_json("/api/admin/recent-bookings").await
    }

    #[tracing::instrument(name = "Fetch booking details", skip(self))]
    pub async fn booking(&self, id: i64) -> Result<BookingDetail, ApiError> {
        self.get_json(&format!("/api/admin/booking/{}", id)).await
    }

    #[tracing::instrument(name = "Update booking status", skip(self))]
    pub async fn update_status(&self, id: i64, status: &BookingStatus) -> Result<(), ApiError> {
        let response = self
            .http_client
            .post(self.url(&format!("/api/admin/booking/{}/status", id)))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    #[tracing::instrument(name = "Download booking export", skip(self))]
    pub async fn export_csv(&self) -> Result<String, ApiError> {
        let response = self.http_client.get(self.url(EXPORT_PATH)).send().await?;
        Ok(check_status(response)?.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http_client.get(self.url(path)).send().await?;
        Ok(check_status(response)?.json().await?)
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    match response.status() {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        status if !status.is_success() => Err(ApiError::Status(status)),
        _ => Ok(response),
    }
}
