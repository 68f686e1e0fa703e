//! src/routes/admin/stats.rs

use crate::domain::{BookingStats, BookingStatus};
use crate::error::DeskResult;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;

pub async fn stats(pool: web::Data<PgPool>) -> DeskResult<HttpResponse> {
    let stats = get_stats(&pool).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Count all bookings, today's bookings (UTC) and bookings still pending.
#[tracing::instrument(skip_all)]
pub async fn get_stats(pool: &PgPool) -> DeskResult<BookingStats> {
    let (total_bookings, today_bookings, pending_tests): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE (created_at AT TIME ZONE 'UTC')::date = $1),
            COUNT(*) FILTER (WHERE status = $2)
        FROM bookings
        "#,
    )
    .bind(Utc::now().date_naive())
    .bind(BookingStatus::PENDING)
    .fetch_one(pool)
    .await
    .context("Failed to count bookings.")?;
    Ok(BookingStats {
        total_bookings,
        today_bookings,
        pending_tests,
    })
}
