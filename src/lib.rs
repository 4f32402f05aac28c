//! **Todos, personal task tracking with nested subtasks**
//!
//! ## 💖 Core functions
//!
//! * Todos and sub todos stored in SQLite or MySQL (based on [SeaORM](https://github.com/SeaQL/sea-orm))
//! * JSON API with OpenAPI v3.x documentation (based on [Poem](https://github.com/poem-web/poem))
//! * Server rendered index page with form submission
//! * Typed web client and list view model (sorting, single editor, optimistic completion)
//! * Multi-environment configuration
//! * Uniform error handling
//!
//! ## ⚙️Feature description
//!
//! * ``web-client`` web client operations, enabled by default
//! * ``test`` containerized MySQL for tests
//!
//! ## 🚀 Quick start
//!
//! All wiring goes through ``TodosApp``.
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() -> TodosResult<()> {
//!     // Load `config/conf-default.toml`, connect the database and create the tables
//!     let app = TodosApp::init("config").await?;
//!     // Mount the API and the index page, serve until ctrl-c
//!     app.start().await
//! }
//! ```
//!
//! ### Endpoints
//!
//!> |-- /                         Index page
//!> |-- /add_todo                 Index page form submit
//!> |-- /add_subtodo              Sub todo creation
//!> |-- /api/todos                Todo API
//!> |-- /api/subtodos             Sub todo API
//!> |-- /api/ui                   OpenAPI UI
//!> |-- /api/spec                 OpenAPI spec
#[macro_use]
extern crate lazy_static;

pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;

use crate::api::page_api;
use crate::api::sub_todo_api::SubTodoApi;
use crate::api::todo_api::TodoApi;
use crate::basic::config::TodosConfig;
use crate::basic::logger::TodosLogger;
use crate::basic::result::TodosResult;
use crate::db::reldb_client::TodosRelDBClient;
use crate::web::poem::endpoint::BoxEndpoint;
use crate::web::poem::Response;
use crate::web::web_server::TodosWebServer;

pub mod api;
pub mod basic;
pub mod client;
pub mod db;
pub mod dto;
pub mod serv;
pub mod web;

/// Module code the JSON API is mounted under
pub const API_MODULE: &str = "api";

/// The assembled application: configuration plus database handle
#[derive(Clone)]
pub struct TodosApp {
    config: TodosConfig,
    reldb: TodosRelDBClient,
}

impl TodosApp {
    /// Load the configuration from `relative_path` and initialize the application
    pub async fn init(relative_path: &str) -> TodosResult<TodosApp> {
        TodosLogger::init()?;
        let config = TodosConfig::init(relative_path)?;
        TodosApp::init_conf(config).await
    }

    /// Initialize from an explicit configuration, connects the database and creates the tables
    pub async fn init_conf(config: TodosConfig) -> TodosResult<TodosApp> {
        TodosLogger::init()?;
        let reldb = TodosRelDBClient::init_by_conf(&config).await?;
        reldb.init_tables().await?;
        Ok(TodosApp { config, reldb })
    }

    pub fn config(&self) -> &TodosConfig {
        &self.config
    }

    pub fn reldb(&self) -> &TodosRelDBClient {
        &self.reldb
    }

    /// Web server with the API module and the index page routes mounted
    pub fn web_server(&self) -> TodosWebServer {
        let mut web_server = TodosWebServer::init_by_conf(&self.config);
        web_server
            .add_module(API_MODULE, (TodoApi::new(self.reldb.clone()), SubTodoApi::new(self.reldb.clone())))
            .add_route_raw_with_data("/", page_api::index, self.reldb.clone())
            .add_route_raw_with_data("/add_todo", page_api::add_todo, self.reldb.clone())
            .add_route_raw_with_data("/add_subtodo", page_api::add_subtodo, self.reldb.clone());
        web_server
    }

    /// The complete endpoint, e.g. for `poem::test::TestClient`
    pub fn endpoint(&self) -> BoxEndpoint<'static, Response> {
        self.web_server().into_endpoint()
    }

    /// Serve until ctrl-c
    pub async fn start(&self) -> TodosResult<()> {
        self.web_server().start().await
    }
}
