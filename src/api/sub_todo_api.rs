use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::db::reldb_client::TodosRelDBClient;
use crate::dto::sub_todo_dto::SubTodoDetailResp;
use crate::dto::todo_dto::TodoModifyReq;
use crate::serv::sub_todo_serv::SubTodoServ;
use crate::web::web_resp::{TodosApiResult, TodosNoContentResp, TodosResp};

pub struct SubTodoApi {
    db: TodosRelDBClient,
}

impl SubTodoApi {
    pub fn new(db: TodosRelDBClient) -> SubTodoApi {
        SubTodoApi { db }
    }
}

// `/subtodos/:id` carries the parent id on GET and the sub todo id otherwise,
// both share one route segment.
#[OpenApi]
impl SubTodoApi {
    /// List all sub todos
    #[oai(path = "/subtodos", method = "get")]
    async fn list_all(&self) -> TodosApiResult<Vec<SubTodoDetailResp>> {
        TodosResp::ok(SubTodoServ::list_all(&self.db).await?)
    }

    /// List the sub todos of a todo
    #[oai(path = "/subtodos/:id", method = "get")]
    async fn list_by_parent(&self, #[oai(name = "id")] parent_id: Path<i32>) -> TodosApiResult<Vec<SubTodoDetailResp>> {
        TodosResp::ok(SubTodoServ::list_by_parent(parent_id.0, &self.db).await?)
    }

    /// Get a sub todo
    #[oai(path = "/subtodo/:id", method = "get")]
    async fn get(&self, id: Path<i32>) -> TodosApiResult<SubTodoDetailResp> {
        TodosResp::ok(SubTodoServ::get(id.0, &self.db).await?)
    }

    /// Overwrite a sub todo
    #[oai(path = "/subtodos/:id", method = "put")]
    async fn modify(&self, id: Path<i32>, modify_req: Json<TodoModifyReq>) -> TodosApiResult<SubTodoDetailResp> {
        TodosResp::ok(SubTodoServ::modify(id.0, &modify_req.0, &self.db).await?)
    }

    /// Complete a sub todo
    #[oai(path = "/subtodos/:id", method = "post")]
    async fn complete(&self, id: Path<i32>) -> poem::Result<TodosNoContentResp> {
        SubTodoServ::complete(id.0, &self.db).await?;
        Ok(TodosNoContentResp::NoContent)
    }

    #[oai(path = "/subtodos/:id", method = "delete")]
    async fn delete(&self, id: Path<i32>) -> poem::Result<TodosNoContentResp> {
        SubTodoServ::delete(id.0, &self.db).await?;
        Ok(TodosNoContentResp::NoContent)
    }
}
