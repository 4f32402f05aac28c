use crate::basic::error::TodosError;
use core::result::Result;

/// Todos return object wrapper
pub type TodosResult<T> = Result<T, TodosError>;
