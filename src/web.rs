pub mod uniform_error_mw;
#[cfg(feature = "web-client")]
pub mod web_client;
pub mod web_resp;
pub mod web_server;

pub use poem;
pub use poem_openapi;
