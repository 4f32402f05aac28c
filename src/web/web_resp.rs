use poem::http::StatusCode;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::basic::error::TodosError;

pub const TODOS_ERROR_FLAG: &str = "__TODOS_ERROR__";

pub type TodosApiResult<T> = poem::Result<Json<T>>;

impl From<TodosError> for poem::Error {
    fn from(error: TodosError) -> Self {
        let status_code = match error {
            TodosError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TodosError::NotFound(_) | TodosError::ParentNotFound(_) => StatusCode::NOT_FOUND,
            TodosError::InternalError(_) | TodosError::Box(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        poem::Error::from_string(format!("{}{}", TODOS_ERROR_FLAG, error), status_code)
    }
}

/// Map a response status and message to an error, `None` for successful statuses.
///
/// Messages produced by [`TodosError`] keep their original code.
pub fn mapping_http_code_to_error(http_code: StatusCode, msg: &str) -> Option<TodosError> {
    if let Some(error) = msg.strip_prefix(TODOS_ERROR_FLAG) {
        return Some(TodosError::form(error));
    }
    match http_code {
        code if code.as_u16() < 400 => None,
        StatusCode::NOT_FOUND => Some(TodosError::NotFound(format!("[Todos.WebServer] Process error: {msg}"))),
        code if code.is_client_error() => Some(TodosError::ValidationError(format!("[Todos.WebServer] Process error: {msg}"))),
        _ => Some(TodosError::InternalError(format!("[Todos.WebServer] Process error: {msg}"))),
    }
}

pub struct TodosResp;

impl TodosResp {
    pub fn ok<T>(data: T) -> TodosApiResult<T> {
        Ok(Json(data))
    }
}

/// Body of every error response
#[derive(Object, Deserialize, Serialize, Clone, Debug)]
pub struct TodosErrorResp {
    pub code: String,
    pub msg: String,
}

#[derive(ApiResponse)]
pub enum TodosNoContentResp {
    #[oai(status = 204)]
    NoContent,
}
