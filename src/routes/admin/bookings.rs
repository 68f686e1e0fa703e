//! src/routes/admin/bookings.rs

use crate::domain::{BookingDetail, BookingStatus, BookingSummary, ValidationError};
use crate::error::{DeskResult, Error};
use crate::routes::MessageBody;
use crate::startup::RecentBookingsLimit;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use sqlx::PgPool;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

pub async fn recent_bookings(
    pool: web::Data<PgPool>,
    limit: web::Data<RecentBookingsLimit>,
) -> DeskResult<HttpResponse> {
    let bookings = get_recent_bookings(&pool, limit.0).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[tracing::instrument(name = "Get booking details", skip(pool))]
pub async fn booking_detail(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> DeskResult<HttpResponse> {
    let booking = get_booking(&pool, path.into_inner())
        .await?
        .ok_or(Error::NotFound)?;
    Ok(HttpResponse::Ok().json(booking))
}

#[tracing::instrument(name = "Update booking status", skip(body, pool))]
pub async fn update_booking_status(
    path: web::Path<i64>,
    body: web::Json<StatusUpdate>,
    pool: web::Data<PgPool>,
) -> DeskResult<HttpResponse> {
    let id = path.into_inner();
    let status = body
        .into_inner()
        .status
        .ok_or(ValidationError::MissingStatus)?;
    let status = BookingStatus::parse(status)?;
    if !set_booking_status(&pool, id, &status).await? {
        return Err(Error::NotFound);
    }
    tracing::info!(booking_id = id, status = %status, "Booking status updated");
    Ok(HttpResponse::Ok().json(MessageBody::new("Status updated successfully")))
}

/// Newest bookings first.
#[tracing::instrument(skip(pool))]
pub async fn get_recent_bookings(pool: &PgPool, limit: u16) -> DeskResult<Vec<BookingSummary>> {
    let bookings = sqlx::query_as::<_, BookingSummary>(
        r#"
        SELECT id, created_at, name, email, phone, test_type, preferred_date, status
        FROM bookings
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
    .context("Failed to read recent bookings from database.")?;
    Ok(bookings)
}

#[tracing::instrument(skip(pool))]
pub async fn get_booking(pool: &PgPool, id: i64) -> DeskResult<Option<BookingDetail>> {
    let booking = sqlx::query_as::<_, BookingDetail>(
        r#"
        SELECT id, name, email, phone, test_type, preferred_date, message, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to read booking from database.")?;
    Ok(booking)
}

/// Returns `false`, if no booking with `id` exists.
#[tracing::instrument(skip(pool))]
async fn set_booking_status(pool: &PgPool, id: i64, status: &BookingStatus) -> DeskResult<bool> {
    let result = sqlx::query(r#"UPDATE bookings SET status = $1 WHERE id = $2"#)
        .bind(status.as_ref())
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to update status of booking.")?;
    Ok(result.rows_affected() > 0)
}
