//! Integration tests for Campus Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-market-integration-tests
//! ```
//!
//! Every test builds its own storefront over an in-memory store and a
//! temporary catalog file, with the catalog delay turned off. Requests go
//! through the router in-process via [`TestApp::send`]; flows that depend on
//! the session cookie use a real listener and a cookie-keeping `reqwest`
//! client from [`TestApp::spawn`].

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use campus_market_storefront::{
    app,
    config::MarketConfig,
    db::{KeyValueStore, MemoryStore},
    state::AppState,
};
use tower::ServiceExt;

/// Catalog used by most tests.
pub const SAMPLE_CATALOG: &str = r#"[
    {"id":"1","title":"二手台灯","price":35,"originalPrice":89,"description":"三档调光","category":"electronics","condition":"new","sellerName":"小陈","sellerAvatar":"a.png","image":"lamp.png"},
    {"id":"2","title":"高数教材","price":"25","category":"books","condition":"used","sellerName":"李学姐","image":"math.png"},
    {"id":"3","title":"羽毛球拍","price":120,"category":"sports","condition":"used","sellerName":"赵同学","image":"racket.png"},
    {"id":"4","title":"电饭煲","price":60,"category":"living","condition":"new","sellerName":"食堂常客","image":"cooker.png"},
    {"id":"5","title":"无线鼠标","price":45,"category":"books","condition":"new","sellerName":"刘同学","image":"mouse.png"}
]"#;

/// Bytes of a tiny PNG header, enough to count as an image upload.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A response with its body read into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` part of the session cookie, if one was set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("cm_session="))
            .and_then(|v| v.split(';').next())
            .map(ToString::to_string)
    }
}

/// A storefront instance for one test.
pub struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    _catalog_dir: tempfile::TempDir,
}

impl TestApp {
    /// Storefront over [`SAMPLE_CATALOG`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Some(SAMPLE_CATALOG))
    }

    /// Storefront over `catalog`, or over a missing catalog file if `None`.
    #[must_use]
    pub fn with_catalog(catalog: Option<&str>) -> Self {
        let catalog_dir = tempfile::tempdir().unwrap();
        let catalog_path = catalog_dir.path().join("data.json");
        if let Some(body) = catalog {
            std::fs::write(&catalog_path, body).unwrap();
        }

        let vars: HashMap<&str, String> = HashMap::from([
            ("MARKET_CATALOG_PATH", catalog_path.display().to_string()),
            ("MARKET_CATALOG_DELAY_MS", "0".to_string()),
            (
                "MARKET_STATIC_DIR",
                concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static").to_string(),
            ),
        ]);
        let config = MarketConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn KeyValueStore> = store.clone();
        let router = app(AppState::new(config, shared));

        Self {
            router,
            store,
            _catalog_dir: catalog_dir,
        }
    }

    /// The local store behind this instance.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Send one request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// `GET uri` with a session cookie.
    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> TestResponse {
        self.send(
            Request::get(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// `POST uri` with a urlencoded form body.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    /// `POST uri` with a multipart body built by [`Multipart`].
    pub async fn post_multipart(&self, uri: &str, form: Multipart) -> TestResponse {
        let (content_type, body) = form.finish();
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Serve on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Log in through the login form.
    pub async fn login(&self, name: &str) {
        let response = self.post_form("/pages/login.html", &format!("username={name}")).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser client that keeps cookies and does not follow redirects.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Minimal `multipart/form-data` body builder.
#[derive(Debug, Default)]
pub struct Multipart {
    parts: Vec<u8>,
}

impl Multipart {
    const BOUNDARY: &'static str = "campus-market-test-boundary";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                Self::BOUNDARY
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                Self::BOUNDARY
            )
            .as_bytes(),
        );
        self.parts.extend_from_slice(bytes);
        self.parts.extend_from_slice(b"\r\n");
        self
    }

    /// The content type header and the finished body.
    #[must_use]
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.parts
            .extend_from_slice(format!("--{}--\r\n", Self::BOUNDARY).as_bytes());
        (
            format!("multipart/form-data; boundary={}", Self::BOUNDARY),
            self.parts,
        )
    }
}

/// The publish form from the desk lamp example, with an image attached.
#[must_use]
pub fn desk_lamp_form() -> Multipart {
    Multipart::new()
        .text("title", "Desk lamp")
        .text("price", "20")
        .text("contact", "123")
        .text("description", "ok")
        .text("condition", "used")
        .file("image", "lamp.png", "image/png", PNG_BYTES)
}
