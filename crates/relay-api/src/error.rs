use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::oauth::ExchangeError;

const MISSING_CODE_PAGE: &str = "<h1>Error: Missing authorization code</h1>";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing authorization code")]
    MissingCode,
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// An [`ApiError`] paired with the front-end origin so the error page can link
/// back to the app.
#[derive(Debug)]
pub struct ErrorPage {
    pub error: ApiError,
    pub frontend_url: String,
}

/// Provider bodies are echoed into this page; askama escapes both fields.
#[derive(Template)]
#[template(
    source = r#"<h1>OAuth Error</h1><p>{{ detail }}</p><p><a href="{{ frontend_url }}">Return to app</a></p>"#,
    ext = "html"
)]
struct ExchangeFailedPage<'a> {
    detail: String,
    frontend_url: &'a str,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingCode => StatusCode::BAD_REQUEST,
            Self::Exchange(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn with_frontend(self, frontend_url: &str) -> ErrorPage {
        ErrorPage {
            error: self,
            frontend_url: frontend_url.to_string(),
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = match &self.error {
            ApiError::MissingCode => MISSING_CODE_PAGE.to_string(),
            ApiError::Exchange(e) => {
                tracing::error!(error = %e, "OAuth error");
                let page = ExchangeFailedPage {
                    detail: e.to_string(),
                    frontend_url: &self.frontend_url,
                };
                match page.render() {
                    Ok(html) => html,
                    Err(render_err) => {
                        tracing::error!(error = %render_err, "Failed to render error page");
                        "<h1>OAuth Error</h1>".to_string()
                    }
                }
            }
        };

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(error: ApiError) -> (StatusCode, String) {
        let response = error
            .with_frontend("https://app.example.com/")
            .into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_code_page() {
        let (status, body) = render(ApiError::MissingCode).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "<h1>Error: Missing authorization code</h1>");
    }

    #[tokio::test]
    async fn test_exchange_page_links_back_and_escapes() {
        let (status, body) = render(ApiError::Exchange(ExchangeError::Rejected {
            status: 401,
            body: "<script>alert(1)</script>".to_string(),
        }))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("<h1>OAuth Error</h1><p>"));
        assert!(body.contains("Token exchange failed: 401 - &lt;script&gt;"));
        assert!(!body.contains("<script>"));
        assert!(body.contains(r#"<a href="https://app.example.com/">Return to app</a>"#));
    }

    #[tokio::test]
    async fn test_exchange_page_escapes_quotes_in_provider_body() {
        let (_, body) = render(ApiError::Exchange(ExchangeError::Rejected {
            status: 400,
            body: r#"{"message":"bad \"code\""}"#.to_string(),
        }))
        .await;

        assert!(!body.contains(r#""message""#));
        assert!(body.contains("message"));
    }
}
