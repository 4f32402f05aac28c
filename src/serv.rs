pub mod sub_todo_serv;
pub mod todo_serv;
