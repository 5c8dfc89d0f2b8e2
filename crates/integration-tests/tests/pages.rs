//! Integration tests for the home page, shared layout, and static assets.

use axum::http::StatusCode;
use campus_market_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_home_shows_first_four_products() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);

    for title in ["二手台灯", "高数教材", "羽毛球拍", "电饭煲"] {
        assert!(response.body.contains(title), "missing {title}");
    }
    assert!(!response.body.contains("无线鼠标"));
    assert!(response.body.contains("./pages/detail.html?id=1"));
}

#[tokio::test]
async fn test_home_category_shortcuts() {
    let app = TestApp::new();
    let response = app.get("/index.html").await;
    assert!(response.body.contains("./pages/list.html?cat=electronics"));
    assert!(response.body.contains("./pages/list.html?cat=books"));
}

#[tokio::test]
async fn test_home_carousel_position_and_wrap() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert!(response.body.contains("translateX(-0%)"));
    assert!(response.body.contains(r#"content="5; url=?slide=1""#));

    let response = app.get("/?slide=1").await;
    assert!(response.body.contains("translateX(-100%)"));

    // Below zero wraps to the last slide, past the end back to the first.
    let response = app.get("/?slide=-1").await;
    assert!(response.body.contains("translateX(-200%)"));
    assert!(response.body.contains(r#"url=?slide=0""#));

    let response = app.get("/?slide=3").await;
    assert!(response.body.contains("translateX(-0%)"));

    let response = app.get("/?slide=abc").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("translateX(-0%)"));
}

#[tokio::test]
async fn test_layout_prefix_and_active_link() {
    let app = TestApp::new();

    let home = app.get("/index.html").await;
    assert!(home.body.contains(r#"<a href="./index.html" class="active">首页</a>"#));
    assert!(home.body.contains(r#"href="./pages/login.html""#));

    let list = app.get("/pages/list.html").await;
    assert!(list.body.contains(r#"<a href="../pages/list.html" class="active">二手市场</a>"#));
    assert!(list.body.contains(r#"<a href="../index.html">首页</a>"#));
    assert!(list.body.contains(r#"href="../pages/register.html""#));
}

#[tokio::test]
async fn test_footer() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert!(response.body.contains("校园二手交易平台. 专为高校学生打造的闲置交易平台。"));
}

#[tokio::test]
async fn test_static_stylesheet() {
    let app = TestApp::new();
    let response = app.get("/static/css/main.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(".carousel-track"));
}
