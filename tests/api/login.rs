//! tests/api/login.rs

use crate::helpers::{assert_error_body, assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn json_login_with_valid_credentials_returns_redirect_target() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.test_user.login(&app).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["redirect"], "/admin");
}

#[tokio::test]
async fn json_login_with_wrong_password_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({
            "username": &app.test_user.username,
            "password": "random-password"
        }))
        .await;

    assert_error_body(response, 401, "Invalid username or password").await;
}

#[tokio::test]
async fn json_login_without_password_is_a_bad_request() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({ "username": "random-username" }))
        .await;

    assert_error_body(response, 400, "Username and password are required").await;
}

#[tokio::test]
async fn the_configured_admin_user_is_created_on_startup() {
    let app = spawn_app().await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(&app.admin_username)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn an_error_flash_message_is_set_on_failed_form_login() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let login_body = serde_json::json!({
        "username": "random-username",
        "password": "random-password"
    });
    let response = app.post_login_form(&login_body).await;

    // Assert
    assert_is_redirect_to(&response, "/admin/login");
    assert!(response.cookies().any(|c| c.name() == "_flash"));

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_login_html().await;
    assert!(html_page.contains(r#"<p><i>Invalid username or password</i></p>"#));

    // Act - Part 3 - Reload the login page
    let html_page = app.get_login_html().await;
    assert!(!html_page.contains(r#"<p><i>Invalid username or password</i></p>"#));
}

#[tokio::test]
async fn form_login_redirects_to_dashboard_on_success() {
    let app = spawn_app().await;

    let response = app
        .post_login_form(&serde_json::json!({
            "username": &app.test_user.username,
            "password": &app.test_user.password
        }))
        .await;
    assert_is_redirect_to(&response, "/admin");

    let html_page = app.get_admin_dashboard_html().await;
    assert!(html_page.contains(&format!("Welcome {}", app.test_user.username)));
}

#[tokio::test]
async fn login_page_redirects_logged_in_users_to_dashboard() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app.get_response_from_url("/admin/login").await;

    assert_is_redirect_to(&response, "/admin");
}
