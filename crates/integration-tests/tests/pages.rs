//! Integration tests for the public pages.

use axum::http::StatusCode;
use noievoi_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_renders_home_sections() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Our Approach"));
    assert!(resp.body.contains("Our Network"));
    assert!(resp.body.contains("Asia Pacific"));
    // Services live on their own page.
    assert!(!resp.body.contains("Strategic Consulting"));
}

#[tokio::test]
async fn test_services_page_lists_services() {
    let mut app = TestApp::new();
    let resp = app.get("/services").await;
    assert_eq!(resp.status, StatusCode::OK);
    for title in [
        "Strategic Consulting",
        "Digital Transformation",
        "Market Entry Strategy",
    ] {
        assert!(resp.body.contains(title), "missing {title}");
    }
}

#[tokio::test]
async fn test_team_page_and_detail() {
    let mut app = TestApp::new();
    let resp = app.get("/team").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Alex Morgan"));
    assert!(resp.body.contains("/team/team-1"));
    assert!(resp.body.contains("mailto:careers@noievoi.com"));

    let resp = app.get("/team/team-1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Alex Morgan"));
    assert!(resp.body.contains("Global Market Expansion"));
}

#[tokio::test]
async fn test_team_detail_redirects_for_unknown_or_non_team_items() {
    let mut app = TestApp::new();
    app.get("/team/nobody").await.assert_redirect("/team");
    app.get("/team/service-1").await.assert_redirect("/team");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/no/such/page").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("Return to Home"));
}

#[tokio::test]
async fn test_deleted_content_disappears_from_page() {
    let mut app = TestApp::new();
    app.state()
        .store()
        .write()
        .await
        .delete_content(&"service-2".into())
        .expect("delete failed");

    let resp = app.get("/services").await;
    assert!(!resp.body.contains("Digital Transformation"));
    assert!(resp.body.contains("Strategic Consulting"));
}
