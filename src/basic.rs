use std::env;

pub mod config;
pub mod error;
pub mod field;
pub mod logger;
pub mod result;

pub fn fetch_profile() -> String {
    env::var("PROFILE").unwrap_or_else(|_| "".to_string())
}
