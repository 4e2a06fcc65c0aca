use axum::{
    Router,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
};

use super::redirect;
use crate::{ApiState, error::ApiError};

/// `state` echoed back when the provider didn't send one.
pub const DEFAULT_STATE: &str = "/";

/// OPTIONS on this route never reaches a handler: the CORS layer answers every
/// OPTIONS request itself.
pub fn routes(callback_path: &str) -> Router<ApiState> {
    Router::new().route(callback_path, get(oauth_callback))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Empty values count as absent. A repeated key keeps its first value.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

async fn oauth_callback(State(state): State<ApiState>, RawQuery(query): RawQuery) -> Response {
    let params = CallbackParams::from_query(query.as_deref());
    match complete_exchange(&state, params).await {
        Ok(response) => response,
        Err(e) => e.with_frontend(&state.config.frontend_url).into_response(),
    }
}

async fn complete_exchange(state: &ApiState, params: CallbackParams) -> Result<Response, ApiError> {
    let code = params.code.ok_or(ApiError::MissingCode)?;
    let return_state = params.state.unwrap_or_else(|| DEFAULT_STATE.to_string());

    tracing::info!("Exchanging code for token...");
    let token = state.exchanger.exchange(&code).await?;

    let location =
        redirect::fragment_redirect_url(&state.config.frontend_url, &token, &return_state);
    Ok(redirect::found_no_store(location))
}
