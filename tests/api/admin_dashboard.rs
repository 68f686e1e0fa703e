//! tests/api/admin_dashboard.rs

use crate::helpers::{assert_is_redirect_to, spawn_app};
use scraper::{Html, Selector};

#[tokio::test]
async fn you_must_be_logged_in_to_access_the_admin_dashboard() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_admin_dashboard().await;

    // Assert
    assert_is_redirect_to(&response, "/admin/login");
}

#[tokio::test]
async fn dashboard_renders_counters_and_one_row_per_recent_booking() {
    // Arrange
    let app = spawn_app().await;
    app.create_booking("Ursula Le Guin", "pending").await;
    app.create_booking("Octavia Butler", "Completed").await;
    app.test_user.login(&app).await;

    // Act
    let html_page = app.get_admin_dashboard_html().await;

    // Assert
    let document = Html::parse_document(&html_page);
    let text_of = |selector: &str| {
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .next()
            .unwrap()
            .text()
            .collect::<String>()
    };
    assert_eq!(text_of("#totalBookings"), "2");
    assert_eq!(text_of("#todayBookings"), "2");
    assert_eq!(text_of("#pendingTests"), "1");

    let rows = Selector::parse("#recentBookings tr").unwrap();
    assert_eq!(document.select(&rows).count(), 2);
    let badge = Selector::parse("span.status-completed").unwrap();
    let badge = document.select(&badge).next().unwrap();
    assert_eq!(badge.text().collect::<String>(), "Completed");
}
