//! src/routes/bookings.rs

use crate::domain::{BookingRequest, BookingStatus, NewBooking};
use crate::error::DeskResult;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use sqlx::PgPool;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[tracing::instrument(
    name = "Adding a new booking.",
    skip(body, pool),
    fields(
        booking_name = tracing::field::Empty,
        booking_email = tracing::field::Empty
    )
)]
pub async fn book_test(
    body: web::Json<BookingRequest>,
    pool: web::Data<PgPool>,
) -> DeskResult<HttpResponse> {
    let new_booking: NewBooking = body.into_inner().try_into()?;
    tracing::Span::current()
        .record("booking_name", &tracing::field::display(new_booking.name.as_ref()))
        .record("booking_email", &tracing::field::display(&new_booking.email));
    let id = insert_booking(&pool, &new_booking).await?;
    tracing::info!(booking_id = id, "New booking created");
    Ok(HttpResponse::Created().json(MessageBody::new("Booking submitted successfully!")))
}

#[tracing::instrument(name = "Saving new booking in the database.", skip_all)]
pub async fn insert_booking(pool: &PgPool, new_booking: &NewBooking) -> DeskResult<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO bookings (name, email, phone, test_type, preferred_date, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(new_booking.name.as_ref())
    .bind(new_booking.email.as_ref())
    .bind(new_booking.phone.as_ref())
    .bind(new_booking.test_type.as_ref())
    .bind(new_booking.preferred_date.as_ref())
    .bind(new_booking.message.as_deref())
    .bind(BookingStatus::PENDING)
    .fetch_one(pool)
    .await
    .context("Failed to insert new booking in the database.")?;
    Ok(id)
}
