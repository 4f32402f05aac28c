use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::db::reldb_client::TodosRelDBClient;
use crate::dto::todo_dto::{TodoAddReq, TodoAddResp, TodoDetailResp, TodoModifyReq};
use crate::serv::todo_serv::TodoServ;
use crate::web::web_resp::{TodosApiResult, TodosNoContentResp, TodosResp};

pub struct TodoApi {
    db: TodosRelDBClient,
}

impl TodoApi {
    pub fn new(db: TodosRelDBClient) -> TodoApi {
        TodoApi { db }
    }
}

#[OpenApi]
impl TodoApi {
    /// List all todos
    #[oai(path = "/todos", method = "get")]
    async fn list(&self) -> TodosApiResult<Vec<TodoDetailResp>> {
        TodosResp::ok(TodoServ::list(&self.db).await?)
    }

    /// Add a todo
    #[oai(path = "/todos", method = "post")]
    async fn add(&self, add_req: Json<TodoAddReq>) -> TodosApiResult<TodoAddResp> {
        let todo_id = TodoServ::add(&add_req.0.name, &self.db).await?;
        TodosResp::ok(TodoAddResp { todo_id })
    }

    /// Get a todo
    #[oai(path = "/todos/:id", method = "get")]
    async fn get(&self, id: Path<i32>) -> TodosApiResult<TodoDetailResp> {
        TodosResp::ok(TodoServ::get(id.0, &self.db).await?)
    }

    /// Overwrite a todo
    #[oai(path = "/todos/:id", method = "put")]
    async fn modify(&self, id: Path<i32>, modify_req: Json<TodoModifyReq>) -> TodosApiResult<TodoDetailResp> {
        TodosResp::ok(TodoServ::modify(id.0, &modify_req.0, &self.db).await?)
    }

    /// Complete a todo, which removes it with its sub todos
    #[oai(path = "/todos/:id", method = "post")]
    async fn complete(&self, id: Path<i32>) -> poem::Result<TodosNoContentResp> {
        TodoServ::complete(id.0, &self.db).await?;
        Ok(TodosNoContentResp::NoContent)
    }

    /// Delete a todo with its sub todos
    #[oai(path = "/todos/:id", method = "delete")]
    async fn delete(&self, id: Path<i32>) -> poem::Result<TodosNoContentResp> {
        TodoServ::delete(id.0, &self.db).await?;
        Ok(TodosNoContentResp::NoContent)
    }
}
