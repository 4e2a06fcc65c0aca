use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::token::TokenResponse;
use crate::{config::ApiConfig, metrics};

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The provider answered with something other than 200.
    #[error("Token exchange failed: {status} - {body}")]
    Rejected { status: u16, body: String },
    /// The request never produced a response (DNS, connect, TLS, timeout...).
    #[error("Token exchange request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Token exchange returned an invalid payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

impl ExchangeError {
    /// Short label used for the outcome metric.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Transport(_) => "transport",
            Self::InvalidPayload(_) => "invalid_payload",
        }
    }
}

/// Exchanges authorization codes for access tokens.
///
/// One attempt per call, no retry. Cloning is cheap: the inner
/// `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct TokenExchanger {
    http: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl TokenExchanger {
    pub fn new(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Build an exchanger with its own HTTP client, honoring the optional
    /// request timeout from the config.
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.token_request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?, config))
    }

    pub const fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub async fn exchange(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        let result = self.request_token(code).await;
        match &result {
            Ok(token) => {
                tracing::info!(
                    expires_in = token.expires_in,
                    extra_fields = ?token.extra_fields(),
                    "Token exchange successful"
                );
                metrics::record_token_exchange("success");
            }
            Err(e @ ExchangeError::Transport(_)) => {
                tracing::error!(error = %e, token_url = %self.token_url, "Token endpoint unreachable");
                metrics::record_token_exchange(e.kind());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token exchange rejected");
                metrics::record_token_exchange(e.kind());
            }
        }
        result
    }

    async fn request_token(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(ExchangeError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ExchangeError::Transport)?;

        if status != StatusCode::OK {
            return Err(ExchangeError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(ExchangeError::InvalidPayload)
    }
}

impl fmt::Debug for TokenExchanger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchanger")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}
