use std::future::Future;

use poem::endpoint::BoxEndpoint;
use poem::listener::TcpListener;
use poem::middleware::Cors;
use poem::{EndpointExt, IntoEndpoint, Response, Route};
use poem_openapi::{OpenApi, OpenApiService, ServerObject};
use tokio::time::Duration;
use tracing::info;

use crate::basic::config::{TodosConfig, WebServerConfig};
use crate::basic::result::TodosResult;
use crate::web::uniform_error_mw::UniformError;

pub struct TodosWebServer {
    app_name: String,
    app_version: String,
    config: WebServerConfig,
    route: Route,
}

impl TodosWebServer {
    pub fn init_by_conf(conf: &TodosConfig) -> TodosWebServer {
        TodosWebServer {
            app_name: conf.app.name.clone(),
            app_version: conf.app.version.clone(),
            config: conf.web_server.clone(),
            route: Route::new(),
        }
    }

    /// Mount an OpenAPI module under `/<code>`, with its UI and spec next to it when configured
    pub fn add_module<T>(&mut self, code: &str, apis: T) -> &mut Self
    where
        T: OpenApi + 'static,
    {
        info!("[Todos.WebServer] Add module {}", code);
        let mut api_serv = OpenApiService::new(apis, &self.app_name, &self.app_version);
        for (env, url) in &self.config.doc_urls {
            let url = if !url.ends_with('/') { format!("{}/{}", url, code) } else { format!("{}{}", url, code) };
            api_serv = api_serv.server(ServerObject::new(url).description(env));
        }
        let ui_serv = api_serv.rapidoc();
        let spec_serv = api_serv.spec();
        let mut route = Route::new();
        route = route.nest("/", api_serv);
        if let Some(ui_path) = &self.config.ui_path {
            route = route.nest(format!("/{}", ui_path), ui_serv);
        }
        if let Some(spec_path) = &self.config.spec_path {
            route = route.at(format!("/{}", spec_path), poem::endpoint::make_sync(move |_| spec_serv.clone()));
        }
        let mut swap_route = Route::new();
        std::mem::swap(&mut swap_route, &mut self.route);
        self.route = swap_route.nest(format!("/{}", code), route);
        self
    }

    /// Mount a plain poem endpoint at an exact path, `data` is reachable through `poem::web::Data`
    pub fn add_route_raw_with_data<E, D>(&mut self, path: &str, ep: E, data: D) -> &mut Self
    where
        E: IntoEndpoint,
        E::Endpoint: 'static,
        D: Clone + Send + Sync + 'static,
    {
        info!("[Todos.WebServer] Add route {}", path);
        let mut swap_route = Route::new();
        std::mem::swap(&mut swap_route, &mut self.route);
        self.route = swap_route.at(path, ep.into_endpoint().data(data));
        self
    }

    /// The complete application endpoint with error rendering and CORS applied
    pub fn into_endpoint(self) -> BoxEndpoint<'static, Response> {
        let cors = if self.config.allowed_origin == "*" {
            Cors::new()
        } else {
            Cors::new().allow_origin(&self.config.allowed_origin)
        };
        self.route.with(UniformError::new(self.config.security_hide_err_msg)).with(cors).boxed()
    }

    /// Serve until ctrl-c
    pub async fn start(self) -> TodosResult<()> {
        self.start_with_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Serve until `signal` resolves, in-flight requests get 5 seconds to finish
    pub async fn start_with_shutdown<F>(self, signal: F) -> TodosResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let output_info = format!(
            r#"
=================
[Todos.WebServer] The {app} application has been launched. Visited at: http://{host}:{port}
================="#,
            app = self.app_name,
            host = self.config.host,
            port = self.config.port,
        );
        let bind = TcpListener::bind(format!("{}:{}", self.config.host, self.config.port));
        let server = poem::Server::new(bind).run_with_graceful_shutdown(self.into_endpoint(), signal, Some(Duration::from_secs(5)));
        info!("{}", output_info);
        server.await?;
        info!("[Todos.WebServer] Stopped");
        Ok(())
    }
}
