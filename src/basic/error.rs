use std::error::Error;
use std::num::ParseIntError;

use derive_more::Display;

pub const GENERAL_SPLIT: &str = "##";

pub const ERROR_VALIDATION_CODE: &str = "VALIDATION_ERROR";
pub const ERROR_NOT_FOUND_CODE: &str = "NOT_FOUND";
pub const ERROR_PARENT_NOT_FOUND_CODE: &str = "PARENT_NOT_FOUND";
pub const ERROR_INTERNAL_CODE: &str = "INTERNAL";

/// Todos unified error wrapper
///
/// The display form is `<code>##<message>`, which is what crosses the web layer.
#[derive(Display, Debug)]
pub enum TodosError {
    /// Missing or invalid required field
    #[display("VALIDATION_ERROR##{_0}")]
    ValidationError(String),
    /// Id doesn't resolve
    #[display("NOT_FOUND##{_0}")]
    NotFound(String),
    /// Subtask creation with an unknown parent
    #[display("PARENT_NOT_FOUND##{_0}")]
    ParentNotFound(String),
    #[display("INTERNAL##{_0}")]
    InternalError(String),
    #[display("INTERNAL##{_0}")]
    Box(Box<dyn Error + Send + Sync>),
}

impl TodosError {
    /// Rebuild an error from its `code` and `message` parts.
    pub fn new(code: &str, msg: &str) -> TodosError {
        match code {
            ERROR_VALIDATION_CODE => TodosError::ValidationError(msg.to_string()),
            ERROR_NOT_FOUND_CODE => TodosError::NotFound(msg.to_string()),
            ERROR_PARENT_NOT_FOUND_CODE => TodosError::ParentNotFound(msg.to_string()),
            _ => TodosError::InternalError(msg.to_string()),
        }
    }

    /// Rebuild an error from its display form, `<code>##<message>`.
    pub fn form(text: &str) -> TodosError {
        let (code, message) = Self::parse(text);
        TodosError::new(&code, &message)
    }

    pub fn parse(text: &str) -> (String, String) {
        match text.split_once(GENERAL_SPLIT) {
            Some((code, message)) => (code.to_string(), message.to_string()),
            None => (ERROR_INTERNAL_CODE.to_string(), text.to_string()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TodosError::ValidationError(_) => ERROR_VALIDATION_CODE,
            TodosError::NotFound(_) => ERROR_NOT_FOUND_CODE,
            TodosError::ParentNotFound(_) => ERROR_PARENT_NOT_FOUND_CODE,
            TodosError::InternalError(_) | TodosError::Box(_) => ERROR_INTERNAL_CODE,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TodosError::ValidationError(msg) | TodosError::NotFound(msg) | TodosError::ParentNotFound(msg) | TodosError::InternalError(msg) => msg.to_string(),
            TodosError::Box(err) => err.to_string(),
        }
    }
}

impl Error for TodosError {}

impl From<std::io::Error> for TodosError {
    fn from(error: std::io::Error) -> Self {
        TodosError::InternalError(error.to_string())
    }
}

impl From<url::ParseError> for TodosError {
    fn from(error: url::ParseError) -> Self {
        TodosError::ValidationError(error.to_string())
    }
}

impl From<ParseIntError> for TodosError {
    fn from(error: ParseIntError) -> Self {
        TodosError::ValidationError(error.to_string())
    }
}

impl From<chrono::ParseError> for TodosError {
    fn from(error: chrono::ParseError) -> Self {
        TodosError::ValidationError(error.to_string())
    }
}

impl From<serde_json::Error> for TodosError {
    fn from(error: serde_json::Error) -> Self {
        TodosError::ValidationError(error.to_string())
    }
}
