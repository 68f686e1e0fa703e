//! src/routes/admin/dashboard.rs

use crate::authentication::UserId;
use crate::dashboard::BookingRow;
use crate::domain::BookingStats;
use crate::routes::admin::{get_recent_bookings, get_stats};
use crate::startup::RecentBookingsLimit;
use actix_web::{web, Responder};
use askama_actix::Template;
use sqlx::PgPool;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    username: String,
    stats: BookingStats,
    bookings: Vec<BookingRow>,
}

pub async fn admin_dashboard(
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
    limit: web::Data<RecentBookingsLimit>,
) -> Result<impl Responder, actix_web::Error> {
    let username = user_id.get_username(&pool).await?;
    let stats = get_stats(&pool).await?;
    let bookings = get_recent_bookings(&pool, limit.0)
        .await?
        .iter()
        .map(BookingRow::from)
        .collect();
    Ok(DashboardTemplate {
        username,
        stats,
        bookings,
    })
}
