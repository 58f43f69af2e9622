//! Integration tests for noievoi.
//!
//! The full site router runs in-process against in-memory storage, so the
//! tests need no server, database or network.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p noievoi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pages` - Public pages and the 404 fallback
//! - `chatbot_api` - Widget JSON endpoints
//! - `admin_auth` - Login, logout and route protection
//! - `admin_content` - Content create, edit, upload and delete
//! - `admin_chatbot` - Chatbot settings and questions
//! - `admin_users` - Admin account management

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde::Serialize;
use tower::ServiceExt;

use noievoi_site::config::SiteConfig;
use noievoi_site::state::AppState;
use noievoi_site::store::{ContentStore, MemoryStorage};

pub use noievoi_site::store::seed::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};

const MULTIPART_BOUNDARY: &str = "noievoi-test-boundary";

/// The site router plus a one-cookie jar for the admin session.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// `Location` header of a redirect.
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// Assert a redirect (303) to `location`.
    ///
    /// # Panics
    ///
    /// Panics if the response is anything else.
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }
}

/// An uploaded file part of a multipart form.
pub struct FilePart<'a> {
    pub name: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// A fresh site over seeded in-memory storage, with no login delay.
    ///
    /// # Panics
    ///
    /// Panics if the seed data cannot be loaded.
    #[must_use]
    pub fn new() -> Self {
        let store = ContentStore::open(Box::new(MemoryStorage::new()))
            .expect("failed to open in-memory store");
        let config = SiteConfig {
            login_delay: std::time::Duration::ZERO,
            ..SiteConfig::default()
        };
        let state = AppState::new(config, store);
        Self {
            router: noievoi_site::app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// Shared state, for inspecting the store directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request, carrying and updating the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let mut request = request;
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(
                header::COOKIE,
                cookie.parse().expect("invalid cookie header"),
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router failed");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .expect("non-ascii cookie")
                .split(';')
                .next()
                .unwrap_or_default()
                .to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `GET uri`.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("bad request");
        self.send(request).await
    }

    /// `POST uri` with an empty body.
    pub async fn post(&mut self, uri: &str) -> TestResponse {
        let request = Request::post(uri).body(Body::empty()).expect("bad request");
        self.send(request).await
    }

    /// `POST uri` with a URL-encoded form body.
    pub async fn post_form<T: Serialize + ?Sized>(&mut self, uri: &str, form: &T) -> TestResponse {
        let body = serde_urlencoded::to_string(form).expect("unencodable form");
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("bad request");
        self.send(request).await
    }

    /// `POST uri` with a JSON body.
    pub async fn post_json(&mut self, uri: &str, json: &serde_json::Value) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("bad request");
        self.send(request).await
    }

    /// `POST uri` with a multipart body of text fields and an optional file.
    pub async fn post_multipart(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<FilePart<'_>>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.name, file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("bad request");
        self.send(request).await
    }

    /// Log in as the seed admin.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login(&mut self) {
        self.login_as(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    }

    /// Log in with the given credentials.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_as(&mut self, email: &str, password: &str) {
        let response = self
            .post_form("/admin/login", &[("email", email), ("password", password)])
            .await;
        response.assert_redirect("/admin/content");
    }
}
