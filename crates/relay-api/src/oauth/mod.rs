//! Authorization-code exchange against the provider's token endpoint.

pub mod exchange;
pub mod token;

pub use exchange::{ExchangeError, TokenExchanger};
pub use token::TokenResponse;
