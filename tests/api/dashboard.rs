//! tests/api/dashboard.rs

use crate::helpers::RecordingView;
use booking_desk::dashboard::{AdminClient, Dashboard, EXPORT_PATH, LOGIN_LOCATION};
use booking_desk::domain::{BookingStats, BookingStatus};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dashboard(mock_server: &MockServer, confirm_answer: bool) -> Dashboard<RecordingView> {
    let client = AdminClient::new(&mock_server.uri(), Duration::from_secs(2)).unwrap();
    Dashboard::new(client, Arc::new(RecordingView::answering(confirm_answer)))
        .with_banner_lifetime(Duration::from_millis(100))
        .with_refresh_interval(Duration::from_millis(20))
}

fn stats_body() -> serde_json::Value {
    serde_json::json!({
        "total_bookings": 17,
        "today_bookings": 3,
        "pending_tests": 5
    })
}

fn bookings_body(n: i64) -> serde_json::Value {
    let statuses = ["pending", "Completed", "CANCELLED"];
    (0..n)
        .map(|i| {
            serde_json::json!({
                "id": i + 1,
                "created_at": "2024-01-05T14:30:00Z",
                "name": format!("Customer {}", i),
                "email": format!("customer{}@example.com", i),
                "phone": "555-0100",
                "test_type": "Blood test",
                "preferred_date": "2024-03-01",
                "status": statuses[(i % 3) as usize]
            })
        })
        .collect::<Vec<_>>()
        .into()
}

async fn mount_refresh(mock_server: &MockServer, expected_calls: u64) {
    Mock::given(path("/api/admin/stats"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
    Mock::given(path("/api/admin/recent-bookings"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_body(2)))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn stats_are_rendered_exactly_as_received() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    dashboard.update_stats().await;

    // Assert
    assert_eq!(
        dashboard.view().last_stats(),
        Some(BookingStats {
            total_bookings: 17,
            today_bookings: 3,
            pending_tests: 5,
        })
    );
    assert!(dashboard.view().shown_errors().is_empty());
}

#[tokio::test]
async fn one_row_is_rendered_per_booking() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/recent-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_body(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    dashboard.update_recent_bookings().await;

    // Assert
    let rows = dashboard.view().last_table().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, "Customer 0");
    assert_eq!(rows[0].test_type, "Blood test");
    assert_eq!(rows[0].phone, "555-0100");
    assert_eq!(rows[0].created_at, "Jan 5, 2024, 02:30 PM");
    assert_eq!(rows[0].status_class, "status-pending");
    assert_eq!(rows[1].status, "Completed");
    assert_eq!(rows[1].status_class, "status-completed");
    assert_eq!(rows[2].status_class, "status-cancelled");
}

#[tokio::test]
async fn an_empty_booking_list_clears_the_table() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/recent-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_body(0)))
        .mount(&mock_server)
        .await;

    dashboard.update_recent_bookings().await;

    assert_eq!(dashboard.view().last_table(), Some(vec![]));
}

#[tokio::test]
async fn unauthorized_data_requests_leave_the_dashboard() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    // Act
    dashboard.update_stats().await;
    dashboard.update_recent_bookings().await;
    dashboard.view_booking(1).await;

    // Assert
    assert_eq!(dashboard.view().locations(), vec![LOGIN_LOCATION.to_string()]);
    assert!(dashboard.has_left_page());
    assert!(dashboard.view().shown_errors().is_empty());
}

#[tokio::test]
async fn a_refresh_with_two_unauthorized_responses_navigates_once() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    dashboard.refresh().await;

    assert_eq!(dashboard.view().locations(), vec!["/".to_string()]);
}

#[tokio::test]
async fn a_failed_fetch_shows_one_banner_which_expires() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    dashboard.update_stats().await;

    // Assert
    assert_eq!(
        dashboard.view().shown_errors(),
        vec!["Failed to load statistics".to_string()]
    );
    assert_eq!(dashboard.view().active_error_count(), 1);
    assert!(dashboard.view().last_stats().is_none());
    assert!(dashboard.view().locations().is_empty());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(dashboard.view().active_error_count(), 0);
    assert_eq!(dashboard.view().shown_errors().len(), 1);
}

#[tokio::test]
async fn an_undecodable_payload_is_reported_as_failure() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/recent-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    dashboard.update_recent_bookings().await;

    assert_eq!(
        dashboard.view().shown_errors(),
        vec!["Failed to load recent bookings".to_string()]
    );
    assert!(dashboard.view().last_table().is_none());
}

#[tokio::test]
async fn confirmed_status_update_posts_once_and_refreshes_once() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/booking/7/status"))
        .and(method("POST"))
        .and(body_json(serde_json::json!({ "status": "completed" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Status updated successfully" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_refresh(&mock_server, 1).await;

    // Act
    let updated = dashboard.update_status(7, &BookingStatus::completed()).await;

    // Assert
    assert!(updated);
    assert_eq!(
        dashboard.view().prompts.lock().unwrap().clone(),
        vec!["Are you sure you want to mark this booking as completed?".to_string()]
    );
    assert_eq!(dashboard.view().stats.lock().unwrap().len(), 1);
    assert_eq!(dashboard.view().tables.lock().unwrap().len(), 1);
    // Mock expectations are checked when `mock_server` is dropped
}

#[tokio::test]
async fn declined_status_update_sends_no_request() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, false);
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Act
    let updated = dashboard.update_status(7, &BookingStatus::cancelled()).await;

    // Assert
    assert!(!updated);
    assert_eq!(dashboard.view().prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_status_update_shows_banner_without_refresh() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/booking/7/status"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_refresh(&mock_server, 0).await;

    // Act
    let updated = dashboard.update_status(7, &BookingStatus::completed()).await;

    // Assert
    assert!(!updated);
    assert_eq!(
        dashboard.view().shown_errors(),
        vec!["Failed to update booking status".to_string()]
    );
}

#[tokio::test]
async fn booking_details_are_formatted_for_display() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/booking/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3,
            "created_at": "2024-01-05T14:30:00Z",
            "name": "Ursula Le Guin",
            "email": "ursula@example.com",
            "phone": "555-0100",
            "test_type": "Blood test",
            "preferred_date": "2024-03-01",
            "message": null,
            "status": "pending"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    dashboard.view_booking(3).await;

    // Assert
    let shown = dashboard.view().bookings.lock().unwrap().clone();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "N/A");
    assert_eq!(shown[0].preferred_date, "Mar 1, 2024, 12:00 AM");
    assert_eq!(shown[0].created_at, "Jan 5, 2024, 02:30 PM");
}

#[tokio::test]
async fn missing_booking_shows_detail_banner() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/api/admin/booking/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    dashboard.view_booking(3).await;

    assert_eq!(
        dashboard.view().shown_errors(),
        vec!["Failed to load booking details".to_string()]
    );
}

#[tokio::test]
async fn unauthenticated_sessions_are_sent_away() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/admin/check-auth"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "authenticated": false })),
        )
        .mount(&mock_server)
        .await;

    // Act
    let authenticated = dashboard.authenticate().await;

    // Assert
    assert!(!authenticated);
    assert_eq!(dashboard.view().locations(), vec!["/".to_string()]);
}

#[tokio::test]
async fn failing_auth_check_is_treated_as_unauthenticated() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/admin/check-auth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    assert!(!dashboard.authenticate().await);
    assert_eq!(dashboard.view().locations(), vec!["/".to_string()]);
}

#[tokio::test]
async fn authenticated_sessions_stay() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/admin/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "authenticated": true, "username": "admin" }),
        ))
        .mount(&mock_server)
        .await;

    assert!(dashboard.authenticate().await);
    assert!(dashboard.view().locations().is_empty());
}

#[tokio::test]
async fn polling_stops_after_the_session_expired() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/admin/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "authenticated": true, "username": "admin" }),
        ))
        .mount(&mock_server)
        .await;
    Mock::given(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(path("/api/admin/recent-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_body(1)))
        .mount(&mock_server)
        .await;

    // Act
    let outcome =
        tokio::time::timeout(Duration::from_secs(5), dashboard.run_until_stopped()).await;

    // Assert
    assert!(outcome.is_ok(), "Polling did not stop after a 401");
    assert!(dashboard.has_left_page());
    assert_eq!(dashboard.view().locations(), vec!["/".to_string()]);
}

#[tokio::test]
async fn polling_refreshes_on_every_interval() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    Mock::given(path("/admin/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "authenticated": true, "username": "admin" }),
        ))
        .mount(&mock_server)
        .await;
    Mock::given(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
        .mount(&mock_server)
        .await;
    Mock::given(path("/api/admin/recent-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookings_body(1)))
        .mount(&mock_server)
        .await;

    // Act
    let _ = tokio::time::timeout(Duration::from_millis(300), dashboard.run_until_stopped()).await;

    // Assert
    assert!(dashboard.view().stats.lock().unwrap().len() >= 2);
    assert!(dashboard.view().locations().is_empty());
}

#[tokio::test]
async fn export_navigates_to_the_export_endpoint() {
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);

    dashboard.export();

    assert_eq!(
        dashboard.view().locations(),
        vec![format!("{}{}", mock_server.uri(), EXPORT_PATH)]
    );
}

#[tokio::test]
async fn export_to_writes_the_downloaded_csv() {
    // Arrange
    let mock_server = MockServer::start().await;
    let dashboard = dashboard(&mock_server, true);
    let csv = "ID,Name,Email,Phone,Test Type,Preferred Date,Message,Status,Created At\n";
    Mock::given(path(EXPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv))
        .expect(1)
        .mount(&mock_server)
        .await;
    let target = std::env::temp_dir().join(format!("{}.csv", uuid::Uuid::new_v4()));

    // Act
    let written = dashboard.export_to(&target).await;

    // Assert
    assert!(written);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), csv);
    std::fs::remove_file(&target).unwrap();
}
