pub mod domain;
pub mod reldb_client;

pub use sea_orm;
pub use sea_orm::sea_query;
