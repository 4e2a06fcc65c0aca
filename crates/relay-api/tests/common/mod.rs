#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use relay_api::{ApiConfig, ApiState};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const FRONTEND_URL: &str = "https://wxsd-sales.github.io/park-and-dial/";
pub const TOKEN_PATH: &str = "/v1/access_token";

/// Test configuration
pub struct TestConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub frontend_url: String,
    pub token_url: String,
    pub callback_path: String,
}

impl TestConfig {
    /// Config pointing the token exchange at the given provider stub
    pub fn for_provider(server: &MockServer) -> Self {
        Self::with_token_url(format!("{}{}", server.uri(), TOKEN_PATH))
    }

    pub fn with_token_url(token_url: String) -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            client_secret: "test_client_secret".to_string(),
            redirect_uri: "https://relay.example.com/callback".to_string(),
            frontend_url: FRONTEND_URL.to_string(),
            token_url,
            callback_path: "/callback".to_string(),
        }
    }

    pub fn into_api_config(self) -> ApiConfig {
        ApiConfig::from_vars([
            ("CLIENT_ID".to_string(), self.client_id),
            ("CLIENT_SECRET".to_string(), self.client_secret),
            ("REDIRECT_URI".to_string(), self.redirect_uri),
            ("FRONTEND_URL".to_string(), self.frontend_url),
            ("TOKEN_URL".to_string(), self.token_url),
            ("CALLBACK_PATH".to_string(), self.callback_path),
        ])
        .expect("Invalid test configuration")
    }

    pub fn build_app(self) -> Router {
        let state = ApiState::new(self.into_api_config()).expect("Failed to create test state");
        relay_api::router::app(state)
    }
}

/// Provider stub answering the token endpoint with a fixed response
pub async fn provider_stub(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a bare OPTIONS request, without CORS request headers
    pub async fn options(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send a browser-style CORS preflight
    pub async fn preflight(&self, uri: &str, origin: &str) -> TestResponse {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn assert_html(&self) {
        let content_type = self
            .header(header::CONTENT_TYPE)
            .expect("Missing Content-Type");
        assert!(
            content_type.starts_with("text/html"),
            "Expected HTML, got {content_type}"
        );
        assert!(!self.body.is_empty(), "HTML body should not be empty");
    }
}
