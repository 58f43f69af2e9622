//! Integration tests for admin account management.

use axum::http::StatusCode;
use noievoi_integration_tests::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, TestApp};

async fn logged_in() -> TestApp {
    let mut app = TestApp::new();
    app.login().await;
    app
}

async fn add_ops_user(app: &mut TestApp) {
    app.post_form(
        "/admin/users",
        &[
            ("email", "ops@noievoi.com"),
            ("password", "s3cret"),
            ("name", "Ops"),
        ],
    )
    .await
    .assert_redirect("/admin/users?success=user_added");
}

#[tokio::test]
async fn test_users_page_hides_credentials() {
    let mut app = logged_in().await;
    let resp = app.get("/admin/users").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(SEED_ADMIN_EMAIL));
    assert!(!resp.body.contains("argon2"));
    assert!(!resp.body.contains(SEED_ADMIN_PASSWORD));
}

#[tokio::test]
async fn test_create_user_and_login() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;
    assert_eq!(app.state().store().read().await.admin_users().len(), 2);

    app.post("/admin/logout").await;
    app.login_as("ops@noievoi.com", "s3cret").await;
    let resp = app.get("/admin/users").await;
    assert!(resp.body.contains("Ops"));
}

#[tokio::test]
async fn test_deleted_account_loses_session() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;
    app.post("/admin/logout").await;
    app.login_as("ops@noievoi.com", "s3cret").await;

    let deleted = app
        .state()
        .store()
        .write()
        .await
        .delete_admin_user("ops@noievoi.com");
    assert!(matches!(deleted, Ok(true)));

    app.get("/admin/users").await.assert_redirect("/admin/login");
    app.get("/admin").await.assert_redirect("/admin/login");
    let resp = app.get("/admin/login").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_user_validation() {
    let mut app = logged_in().await;

    app.post_form(
        "/admin/users",
        &[("email", SEED_ADMIN_EMAIL), ("password", "x"), ("name", "")],
    )
    .await
    .assert_redirect("/admin/users?error=exists");

    app.post_form(
        "/admin/users",
        &[("email", "not-an-email"), ("password", "x"), ("name", "")],
    )
    .await
    .assert_redirect("/admin/users?error=email");

    app.post_form(
        "/admin/users",
        &[("email", "ops@noievoi.com"), ("password", ""), ("name", "")],
    )
    .await
    .assert_redirect("/admin/users?error=password");

    assert_eq!(app.state().store().read().await.admin_users().len(), 1);
}

#[tokio::test]
async fn test_update_user() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;

    app.post_form(
        "/admin/users/update",
        &[
            ("original_email", "ops@noievoi.com"),
            ("email", "operations@noievoi.com"),
            ("name", "Operations"),
            ("password", ""),
        ],
    )
    .await
    .assert_redirect("/admin/users?success=user_updated");

    let mut store = app.state().store().write().await;
    assert!(store.find_admin_user("ops@noievoi.com").is_none());
    let user = store
        .find_admin_user("operations@noievoi.com")
        .expect("renamed user missing");
    assert_eq!(user.name.as_deref(), Some("Operations"));
    // Blank password keeps the old one.
    assert!(store.login("operations@noievoi.com", "s3cret").expect("login failed"));
}

#[tokio::test]
async fn test_update_rejects_taken_email() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;

    app.post_form(
        "/admin/users/update",
        &[
            ("original_email", "ops@noievoi.com"),
            ("email", SEED_ADMIN_EMAIL),
            ("name", ""),
            ("password", ""),
        ],
    )
    .await
    .assert_redirect("/admin/users?edit=ops%40noievoi.com&error=exists");
}

#[tokio::test]
async fn test_update_redirect_encodes_plus_in_email() {
    let mut app = logged_in().await;
    app.post_form(
        "/admin/users",
        &[
            ("email", "ops+team@noievoi.com"),
            ("password", "s3cret"),
            ("name", "Ops"),
        ],
    )
    .await
    .assert_redirect("/admin/users?success=user_added");

    app.post_form(
        "/admin/users/update",
        &[
            ("original_email", "ops+team@noievoi.com"),
            ("email", SEED_ADMIN_EMAIL),
            ("name", ""),
            ("password", ""),
        ],
    )
    .await
    .assert_redirect("/admin/users?edit=ops%2Bteam%40noievoi.com&error=exists");

    let resp = app.get("/admin/users?edit=ops%2Bteam%40noievoi.com").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("ops+team@noievoi.com"));
}

#[tokio::test]
async fn test_update_self_refreshes_header() {
    let mut app = logged_in().await;
    app.post_form(
        "/admin/users/update",
        &[
            ("original_email", SEED_ADMIN_EMAIL),
            ("email", SEED_ADMIN_EMAIL),
            ("name", "Head Office"),
            ("password", ""),
        ],
    )
    .await
    .assert_redirect("/admin/users?success=user_updated");

    let resp = app.get("/admin/content").await;
    assert!(resp.body.contains("Head Office"));
}

#[tokio::test]
async fn test_last_admin_cannot_be_deleted() {
    let mut app = logged_in().await;
    app.post_form("/admin/users/delete", &[("email", SEED_ADMIN_EMAIL)])
        .await
        .assert_redirect("/admin/users?error=last_admin");
    assert_eq!(app.state().store().read().await.admin_users().len(), 1);
}

#[tokio::test]
async fn test_delete_other_user() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;

    app.post_form("/admin/users/delete", &[("email", "ops@noievoi.com")])
        .await
        .assert_redirect("/admin/users?success=user_deleted");
    assert_eq!(app.state().store().read().await.admin_users().len(), 1);
}

#[tokio::test]
async fn test_delete_self_logs_out() {
    let mut app = logged_in().await;
    add_ops_user(&mut app).await;

    app.post_form("/admin/users/delete", &[("email", SEED_ADMIN_EMAIL)])
        .await
        .assert_redirect("/admin/login");
    assert!(!app.state().store().read().await.is_authenticated());
    app.get("/admin/users").await.assert_redirect("/admin/login");
}
