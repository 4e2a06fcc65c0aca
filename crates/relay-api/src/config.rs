use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Webex access token endpoint, used unless `TOKEN_URL` overrides it.
pub const DEFAULT_TOKEN_URL: &str = "https://webexapis.com/v1/access_token";
pub const DEFAULT_CALLBACK_PATH: &str = "/callback";

/// Environment keys read by [`ApiConfig`], in the order they are documented.
pub const CONFIG_KEYS: [&str; 10] = [
    "CLIENT_ID",
    "CLIENT_SECRET",
    "REDIRECT_URI",
    "FRONTEND_URL",
    "TOKEN_URL",
    "CALLBACK_PATH",
    "TOKEN_REQUEST_TIMEOUT_SECS",
    "ENV",
    "HOST",
    "PORT",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue {
                name: "ENV",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Env(#[from] envy::Error),
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("{name} is not a valid absolute URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Raw settings as they come out of the environment, before validation.
#[derive(Deserialize)]
struct RawConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    frontend_url: String,
    token_url: Option<String>,
    callback_path: Option<String>,
    token_request_timeout_secs: Option<u64>,
    env: Option<String>,
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

#[derive(Clone)]
pub struct ApiConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Must match the redirect URI registered with the provider.
    pub redirect_uri: String,
    /// Allowed front-end origin; also the prefix of the success redirect.
    pub frontend_url: String,
    pub token_url: Url,
    pub callback_path: String,
    pub token_request_timeout: Option<Duration>,
    pub env: Environment,
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build the config from arbitrary key/value pairs using the same keys as
    /// the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw: RawConfig = envy::from_iter(vars)?;
        Self::validate(raw)
    }

    #[cfg(feature = "shuttle")]
    pub fn from_shuttle_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        let vars = CONFIG_KEYS
            .iter()
            .filter_map(|key| secrets.get(key).map(|value| ((*key).to_string(), value)));
        Self::from_vars(vars)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let client_id = required("CLIENT_ID", raw.client_id)?;
        let client_secret = required("CLIENT_SECRET", raw.client_secret)?;
        let redirect_uri = required("REDIRECT_URI", raw.redirect_uri)?;
        let frontend_url = required("FRONTEND_URL", raw.frontend_url)?;

        parse_url("REDIRECT_URI", &redirect_uri)?;
        parse_url("FRONTEND_URL", &frontend_url)?;
        let token_url = parse_url(
            "TOKEN_URL",
            raw.token_url.as_deref().unwrap_or(DEFAULT_TOKEN_URL),
        )?;

        let callback_path = raw
            .callback_path
            .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string());
        if !callback_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                name: "CALLBACK_PATH",
                value: callback_path,
            });
        }

        let env = raw
            .env
            .as_deref()
            .map(str::parse::<Environment>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            frontend_url,
            token_url,
            callback_path,
            token_request_timeout: raw
                .token_request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            env,
            host: raw.host,
            port: raw.port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// The client secret must never end up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uri", &self.redirect_uri)
            .field("frontend_url", &self.frontend_url)
            .field("token_url", &self.token_url.as_str())
            .field("callback_path", &self.callback_path)
            .field("token_request_timeout", &self.token_request_timeout)
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn required(name: &'static str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value)
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl { name, source })
}
