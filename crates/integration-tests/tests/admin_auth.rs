//! Integration tests for admin login, logout and route protection.

use axum::http::StatusCode;
use noievoi_integration_tests::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, TestApp};

#[tokio::test]
async fn test_admin_pages_redirect_to_login() {
    let mut app = TestApp::new();
    app.get("/admin").await.assert_redirect("/admin/login");
    for path in ["/admin/content", "/admin/chatbot", "/admin/users"] {
        app.get(path).await.assert_redirect("/admin/login");
    }

    let resp = app.get("/admin/login").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("name=\"password\""));
}

#[tokio::test]
async fn test_failed_login() {
    let mut app = TestApp::new();
    let resp = app
        .post_form(
            "/admin/login",
            &[("email", SEED_ADMIN_EMAIL), ("password", "wrong")],
        )
        .await;
    resp.assert_redirect("/admin/login?error=credentials");
    assert!(!app.state().store().read().await.is_authenticated());

    let resp = app.get("/admin/login?error=credentials").await;
    assert!(resp.body.contains("Login failed: Invalid email or password"));

    app.get("/admin/content").await.assert_redirect("/admin/login");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let mut app = TestApp::new();
    let resp = app
        .post_form(
            "/admin/login",
            &[
                ("email", SEED_ADMIN_EMAIL.to_uppercase().as_str()),
                ("password", SEED_ADMIN_PASSWORD),
            ],
        )
        .await;
    resp.assert_redirect("/admin/login?error=credentials");
}

#[tokio::test]
async fn test_login_and_logout() {
    let mut app = TestApp::new();
    app.login().await;
    assert!(app.state().store().read().await.is_authenticated());

    let resp = app.get("/admin/content").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(SEED_ADMIN_EMAIL));

    app.get("/admin").await.assert_redirect("/admin/content");
    app.get("/admin/login").await.assert_redirect("/admin/content");

    let resp = app.post("/admin/logout").await;
    resp.assert_redirect("/admin/login?success=logged_out");
    assert!(!app.state().store().read().await.is_authenticated());

    app.get("/admin/content").await.assert_redirect("/admin/login");
}
