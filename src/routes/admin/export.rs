//! src/routes/admin/export.rs

use crate::domain::BookingDetail;
use crate::error::DeskResult;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use sqlx::PgPool;

const CSV_HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Test Type",
    "Preferred Date",
    "Message",
    "Status",
    "Created At",
];

/// Download of all bookings as `bookings.csv`.
#[tracing::instrument(name = "Export bookings", skip_all)]
pub async fn export_bookings(pool: web::Data<PgPool>) -> DeskResult<HttpResponse> {
    let bookings = get_all_bookings(&pool).await?;
    let csv = bookings_to_csv(&bookings)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename("bookings.csv".into())],
        })
        .body(csv))
}

#[tracing::instrument(skip_all)]
async fn get_all_bookings(pool: &PgPool) -> DeskResult<Vec<BookingDetail>> {
    let bookings = sqlx::query_as::<_, BookingDetail>(
        r#"
        SELECT id, name, email, phone, test_type, preferred_date, message, status, created_at
        FROM bookings
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to read bookings for export.")?;
    Ok(bookings)
}

pub fn bookings_to_csv(bookings: &[BookingDetail]) -> Result<String, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;
    for booking in bookings {
        let id = booking.id.to_string();
        let created_at = booking.created_at.format("%Y-%m-%d %H:%M:%S%.6f").to_string();
        writer.write_record([
            id.as_str(),
            booking.name.as_str(),
            booking.email.as_str(),
            booking.phone.as_str(),
            booking.test_type.as_str(),
            booking.preferred_date.as_str(),
            booking.message.as_deref().unwrap_or_default(),
            booking.status.as_str(),
            created_at.as_str(),
        ])?;
    }
    let bytes = writer.into_inner().context("Failed to flush csv writer.")?;
    String::from_utf8(bytes).context("Exported csv is not valid utf-8.")
}
