pub mod sub_todo_dto;
pub mod todo_dto;
