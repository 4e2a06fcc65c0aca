use std::sync::Arc;

use crate::{ApiConfig, oauth::TokenExchanger};

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub config: Arc<ApiConfig>,
    pub exchanger: TokenExchanger,
}

impl ApiState {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let exchanger = TokenExchanger::from_config(&config)?;

        tracing::info!(
            token_url = %exchanger.token_url(),
            callback_path = %config.callback_path,
            frontend_url = %config.frontend_url,
            "OAuth relay configured"
        );

        Ok(Self {
            config: Arc::new(config),
            exchanger,
        })
    }
}
