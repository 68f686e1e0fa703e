//! tests/api/logout.rs

use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn logout_clears_session_state() {
    // Arrange
    let app = spawn_app().await;

    // Act - Part 1 - Login
    let response = app.test_user.login(&app).await;
    assert_eq!(response.status().as_u16(), 200);

    // Act - Part 2 - Follow the redirect target
    let html_page = app.get_admin_dashboard_html().await;
    assert!(html_page.contains(&format!("Welcome {}", app.test_user.username)));

    // Act - Part 3 - Logout
    let response = app.get_logout().await;
    assert_is_redirect_to(&response, "/");

    // Act - Part 4 - Follow the redirect
    let html_page = app.get_html("/").await;
    assert!(html_page.contains(r#"<p><i>You have successfully logged out.</i></p>"#));

    // Act - Part 5 - Attempt to load admin panel
    let response = app.get_admin_dashboard().await;
    assert_is_redirect_to(&response, "/admin/login");
}

#[tokio::test]
async fn anonymous_users_cannot_log_out() {
    let app = spawn_app().await;

    let response = app.get_logout().await;

    assert_is_redirect_to(&response, "/admin/login");
}
