pub mod sub_to_do;
pub mod todo;
