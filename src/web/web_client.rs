use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, trace};

use crate::basic::config::WebClientConfig;
use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;
use crate::web::web_resp::TodosErrorResp;

pub struct TodosWebClient {
    base_url: String,
    client: Client,
}

#[derive(Debug)]
pub struct TodosHttpResponse<T> {
    pub code: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<T>,
}

impl TodosWebClient {
    pub fn init(conf: &WebClientConfig) -> TodosResult<TodosWebClient> {
        info!("[Todos.WebClient] Initializing, base url:{}", conf.base_url);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(conf.connect_timeout_sec))
            .timeout(Duration::from_secs(conf.request_timeout_sec))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        info!("[Todos.WebClient] Initialized");
        Ok(TodosWebClient {
            base_url: conf.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TodosResult<TodosHttpResponse<T>> {
        let (code, headers, response) = self.request::<()>(Method::GET, path, None, None).await?;
        self.to_json::<T>(code, headers, response).await
    }

    pub async fn get_to_str(&self, path: &str) -> TodosResult<TodosHttpResponse<String>> {
        let (code, headers, response) = self.request::<()>(Method::GET, path, None, None).await?;
        self.to_text(code, headers, response).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> TodosResult<TodosHttpResponse<T>> {
        let (code, headers, response) = self.request(Method::POST, path, Some(body), None).await?;
        self.to_json::<T>(code, headers, response).await
    }

    pub async fn post_to_void(&self, path: &str) -> TodosResult<TodosHttpResponse<String>> {
        let (code, headers, response) = self.request::<()>(Method::POST, path, None, None).await?;
        self.to_text(code, headers, response).await
    }

    /// Post `application/x-www-form-urlencoded` fields
    pub async fn post_form_to_str(&self, path: &str, form: &[(&str, &str)]) -> TodosResult<TodosHttpResponse<String>> {
        let (code, headers, response) = self.request::<()>(Method::POST, path, None, Some(form)).await?;
        self.to_text(code, headers, response).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> TodosResult<TodosHttpResponse<T>> {
        let (code, headers, response) = self.request(Method::PUT, path, Some(body), None).await?;
        self.to_json::<T>(code, headers, response).await
    }

    pub async fn delete_to_void(&self, path: &str) -> TodosResult<TodosHttpResponse<String>> {
        let (code, headers, response) = self.request::<()>(Method::DELETE, path, None, None).await?;
        self.to_text(code, headers, response).await
    }

    async fn request<B: Serialize>(&self, method: Method, path: &str, body: Option<&B>, form: Option<&[(&str, &str)]>) -> TodosResult<(u16, HashMap<String, String>, Response)> {
        let url = format!("{}{}", self.base_url, path);
        let method_str = method.to_string();
        trace!("[Todos.WebClient] Request {}:{}", method_str, url);
        let mut result = self.client.request(method, &url);
        if let Some(body) = body {
            result = result.json(body);
        }
        if let Some(form) = form {
            result = result.form(form);
        }
        let response = result.send().await?;
        let code = response.status().as_u16();
        let headers = response.headers().iter().filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string()))).collect();
        trace!("[Todos.WebClient] Request {}:{}, Response {}", method_str, url, code);
        Ok((code, headers, response))
    }

    async fn to_text(&self, code: u16, headers: HashMap<String, String>, response: Response) -> TodosResult<TodosHttpResponse<String>> {
        match response.text().await {
            Ok(body) => Ok(TodosHttpResponse { code, headers, body: Some(body) }),
            Err(error) => Err(TodosError::InternalError(format!("[Todos.WebClient] {error:?}"))),
        }
    }

    /// Decode a JSON body, error bodies are turned back into [`TodosError`]
    async fn to_json<T: DeserializeOwned>(&self, code: u16, headers: HashMap<String, String>, response: Response) -> TodosResult<TodosHttpResponse<T>> {
        if code >= 400 {
            let body = response.text().await?;
            return Err(TodosWebClient::to_error(code, &body));
        }
        match response.json().await {
            Ok(body) => Ok(TodosHttpResponse { code, headers, body: Some(body) }),
            Err(error) => Err(TodosError::InternalError(format!("[Todos.WebClient] {error:?}"))),
        }
    }

    /// Rebuild the server side error from a [`TodosErrorResp`] body
    pub fn to_error(code: u16, body: &str) -> TodosError {
        match serde_json::from_str::<TodosErrorResp>(body) {
            Ok(error) => TodosError::new(&error.code, &error.msg),
            Err(_) => TodosError::InternalError(format!("[Todos.WebClient] Unexpected response {code}: {body}")),
        }
    }
}

impl From<reqwest::Error> for TodosError {
    fn from(error: reqwest::Error) -> Self {
        TodosError::Box(Box::new(error))
    }
}
