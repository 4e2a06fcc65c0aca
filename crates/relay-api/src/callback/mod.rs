pub mod redirect;
pub mod routes;

pub use routes::{CallbackParams, DEFAULT_STATE, routes};
