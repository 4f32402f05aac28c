use crate::basic::config::WebClientConfig;
use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;
use crate::dto::sub_todo_dto::{SubTodoAddReq, SubTodoAddResp, SubTodoDetailResp};
use crate::dto::todo_dto::{TodoAddReq, TodoAddResp, TodoDetailResp, TodoModifyReq};
use crate::web::web_client::{TodosHttpResponse, TodosWebClient};

/// Typed HTTP client of the todos service
pub struct TodoClient {
    client: TodosWebClient,
}

impl TodoClient {
    pub fn new(client: TodosWebClient) -> TodoClient {
        TodoClient { client }
    }

    pub fn init(conf: &WebClientConfig) -> TodosResult<TodoClient> {
        Ok(TodoClient::new(TodosWebClient::init(conf)?))
    }

    /// Index page HTML
    pub async fn index(&self) -> TodosResult<String> {
        let resp = self.client.get_to_str("/").await?;
        Self::expect_status(&resp, 200)?;
        Ok(resp.body.unwrap_or_default())
    }

    pub async fn list_todos(&self) -> TodosResult<Vec<TodoDetailResp>> {
        Self::body(self.client.get("/api/todos").await?)
    }

    pub async fn get_todo(&self, id: i32) -> TodosResult<TodoDetailResp> {
        Self::body(self.client.get(&format!("/api/todos/{id}")).await?)
    }

    pub async fn add_todo(&self, name: &str) -> TodosResult<i32> {
        let resp: TodosHttpResponse<TodoAddResp> = self.client.post("/api/todos", &TodoAddReq { name: name.to_string() }).await?;
        Ok(Self::body(resp)?.todo_id)
    }

    /// Submit the index page form, the server answers with a redirect to `/`
    pub async fn add_todo_by_form(&self, name: &str) -> TodosResult<()> {
        let resp = self.client.post_form_to_str("/add_todo", &[("new_todo", name)]).await?;
        Self::expect_status(&resp, 303)
    }

    pub async fn modify_todo(&self, id: i32, modify_req: &TodoModifyReq) -> TodosResult<TodoDetailResp> {
        Self::body(self.client.put(&format!("/api/todos/{id}"), modify_req).await?)
    }

    pub async fn complete_todo(&self, id: i32) -> TodosResult<()> {
        let resp = self.client.post_to_void(&format!("/api/todos/{id}")).await?;
        Self::expect_status(&resp, 204)
    }

    pub async fn delete_todo(&self, id: i32) -> TodosResult<()> {
        let resp = self.client.delete_to_void(&format!("/api/todos/{id}")).await?;
        Self::expect_status(&resp, 204)
    }

    pub async fn list_sub_todos(&self) -> TodosResult<Vec<SubTodoDetailResp>> {
        Self::body(self.client.get("/api/subtodos").await?)
    }

    pub async fn list_sub_todos_by_parent(&self, parent_id: i32) -> TodosResult<Vec<SubTodoDetailResp>> {
        Self::body(self.client.get(&format!("/api/subtodos/{parent_id}")).await?)
    }

    pub async fn get_sub_todo(&self, id: i32) -> TodosResult<SubTodoDetailResp> {
        Self::body(self.client.get(&format!("/api/subtodo/{id}")).await?)
    }

    pub async fn add_sub_todo(&self, name: &str, parent_id: i32) -> TodosResult<i32> {
        let add_req = SubTodoAddReq {
            name: name.to_string(),
            parent_id,
        };
        let resp: TodosHttpResponse<SubTodoAddResp> = self.client.post("/add_subtodo", &add_req.to_json()).await?;
        Ok(Self::body(resp)?.subtodo_id)
    }

    pub async fn modify_sub_todo(&self, id: i32, modify_req: &TodoModifyReq) -> TodosResult<SubTodoDetailResp> {
        Self::body(self.client.put(&format!("/api/subtodos/{id}"), modify_req).await?)
    }

    pub async fn complete_sub_todo(&self, id: i32) -> TodosResult<()> {
        let resp = self.client.post_to_void(&format!("/api/subtodos/{id}")).await?;
        Self::expect_status(&resp, 204)
    }

    pub async fn delete_sub_todo(&self, id: i32) -> TodosResult<()> {
        let resp = self.client.delete_to_void(&format!("/api/subtodos/{id}")).await?;
        Self::expect_status(&resp, 204)
    }

    fn body<T>(resp: TodosHttpResponse<T>) -> TodosResult<T> {
        resp.body.ok_or_else(|| TodosError::InternalError(format!("[Todos.Client] Empty response body, status {}", resp.code)))
    }

    fn expect_status(resp: &TodosHttpResponse<String>, expected: u16) -> TodosResult<()> {
        if resp.code == expected {
            return Ok(());
        }
        Err(TodosWebClient::to_error(resp.code, resp.body.as_deref().unwrap_or_default()))
    }
}
