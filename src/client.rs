#[cfg(feature = "web-client")]
pub mod todo_client;
pub mod view;
