//! Integration tests for the login stub and logout.

use axum::http::StatusCode;
use campus_market_integration_tests::{TestApp, browser};
use campus_market_storefront::db::SessionRepository;

#[tokio::test]
async fn test_login_records_name() {
    let app = TestApp::new();
    let response = app.post_form("/pages/login.html", "username=xiaoli").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/index.html"));

    let user = SessionRepository::new(app.store()).current().unwrap().unwrap();
    assert_eq!(user.name, "xiaoli");

    let home = app.get("/").await;
    assert!(home.body.contains("Hi, xiaoli"));
    assert!(home.body.contains("退出"));
    assert!(!home.body.contains(r#"class="btn-login""#));
}

#[tokio::test]
async fn test_blank_name_falls_back() {
    let app = TestApp::new();
    app.post_form("/pages/register.html", "username=++").await;

    let user = SessionRepository::new(app.store()).current().unwrap().unwrap();
    assert_eq!(user.name, "同学");
}

#[tokio::test]
async fn test_register_page_is_the_login_stub() {
    let app = TestApp::new();
    let page = app.get("/pages/register.html").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("注册"));
    assert!(page.body.contains(r#"name="username""#));
}

#[tokio::test]
async fn test_logout_returns_to_current_page() {
    let app = TestApp::new();
    app.login("xiaoli").await;

    let page = app.get("/pages/detail.html?id=2").await;
    assert!(page.body.contains(r#"name="return_to" value="/pages/detail.html?id=2""#));

    let response = app
        .post_form("/logout", "return_to=%2Fpages%2Fdetail.html%3Fid%3D2")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/pages/detail.html?id=2"));
    assert!(SessionRepository::new(app.store()).current().unwrap().is_none());

    let home = app.get("/").await;
    assert!(home.body.contains(r#"class="btn-login""#));
}

#[tokio::test]
async fn test_logout_ignores_offsite_return() {
    let app = TestApp::new();
    app.login("xiaoli").await;

    let response = app
        .post_form("/logout", "return_to=%2F%2Fevil.example.com")
        .await;
    assert_eq!(response.location(), Some("/index.html"));

    let response = app.post_form("/logout", "").await;
    assert_eq!(response.location(), Some("/index.html"));
}

#[tokio::test]
async fn test_publish_gate_round_trip_in_browser() {
    let app = TestApp::new();
    let base = app.spawn().await;
    let client = browser();

    let response = client
        .get(format!("{base}/pages/publish.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);

    let login_page = client
        .get(format!("{base}/pages/login.html"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(login_page.contains("请先登录后再发布商品"));

    // Alerts show once.
    let again = client
        .get(format!("{base}/pages/login.html"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!again.contains("请先登录后再发布商品"));

    let response = client
        .post(format!("{base}/pages/login.html"))
        .form(&[("username", "xiaoli")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{base}/pages/publish.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
