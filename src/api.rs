pub mod page_api;
pub mod sub_todo_api;
pub mod todo_api;
