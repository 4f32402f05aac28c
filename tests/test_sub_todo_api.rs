// https://github.com/poem-web/poem

use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::json;

use todos::basic::config::{DBConfig, TodosConfig};
use todos::basic::result::TodosResult;
use todos::dto::sub_todo_dto::SubTodoDetailResp;
use todos::TodosApp;

#[tokio::test]
async fn test_sub_todo_api() -> TodosResult<()> {
    let app = TodosApp::init_conf(TodosConfig::builder().db(DBConfig::builder().max_connections(1).min_connections(1).build()).build()).await?;
    let cli = TestClient::new(app.endpoint());

    let resp = cli.post("/api/todos").body_json(&json!({"name": "move house"})).send().await;
    let todo_id = resp.json().await.value().object().get("todoId").i64();
    let resp = cli.post("/api/todos").body_json(&json!({"name": "holiday"})).send().await;
    let other_id = resp.json().await.value().object().get("todoId").i64();

    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "pack boxes", "parentId": todo_id})).send().await;
    resp.assert_status_is_ok();
    let pack_id = resp.json().await.value().object().get("subtodoId").i64();
    // parentId may also arrive as a string
    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "rent van", "parentId": todo_id.to_string()})).send().await;
    resp.assert_status_is_ok();
    let van_id = resp.json().await.value().object().get("subtodoId").i64();
    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "book flight", "parentId": other_id})).send().await;
    let flight_id = resp.json().await.value().object().get("subtodoId").i64();

    let resp = cli.get(format!("/api/subtodos/{todo_id}")).send().await;
    resp.assert_status_is_ok();
    let sub_todos: Vec<SubTodoDetailResp> = resp.json().await.value().deserialize();
    assert_eq!(sub_todos.iter().map(|sub_todo| sub_todo.id as i64).collect::<Vec<_>>(), vec![pack_id, van_id]);
    assert!(sub_todos.iter().all(|sub_todo| sub_todo.parent_id as i64 == todo_id));

    cli.get("/api/subtodos").send().await.json().await.value().array().assert_len(3);
    cli.get("/api/subtodos/999").send().await.json().await.value().array().assert_len(0);

    let resp = cli.get(format!("/api/subtodo/{pack_id}")).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let sub_todo = json.value().object();
    sub_todo.get("name").assert_string("pack boxes");
    sub_todo.get("parentId").assert_i64(todo_id);
    sub_todo.get("deadline").assert_null();
    cli.get("/api/subtodo/999").send().await.assert_status(StatusCode::NOT_FOUND);

    // Unknown parent, nothing is created
    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "orphan", "parentId": 999})).send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.json().await.value().object().get("code").assert_string("PARENT_NOT_FOUND");
    cli.get("/api/subtodos").send().await.json().await.value().array().assert_len(3);

    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "no parent"})).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.json().await.value().object().get("code").assert_string("VALIDATION_ERROR");
    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "bad parent", "parentId": "abc"})).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    // A zero parentId counts as missing
    for parent_id in [json!(0), json!("0"), json!(-1)] {
        let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "zero parent", "parentId": parent_id})).send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json().await.value().object().get("code").assert_string("VALIDATION_ERROR");
    }
    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "", "parentId": todo_id})).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = cli
        .put(format!("/api/subtodos/{van_id}"))
        .body_json(&json!({
            "updateName": "rent big van",
            "updateDescription": "7.5t",
            "updatePrio": 3,
            "updateDeadline": "2024-06-30T08:00"
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let sub_todo: SubTodoDetailResp = resp.json().await.value().deserialize();
    assert_eq!(sub_todo.name, "rent big van");
    assert_eq!(sub_todo.description.as_deref(), Some("7.5t"));
    assert_eq!(sub_todo.prio, Some(3));
    assert_eq!(sub_todo.deadline.as_deref(), Some("2024-06-30 08:00:00"));
    assert_eq!(sub_todo.parent_id as i64, todo_id);

    let resp = cli.put(format!("/api/subtodos/{van_id}")).body_json(&json!({"updateName": "x", "updateDeadline": "31.02.2024"})).send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let resp = cli.get(format!("/api/subtodo/{van_id}")).send().await;
    let unchanged: SubTodoDetailResp = resp.json().await.value().deserialize();
    assert_eq!(unchanged, sub_todo);
    cli.put("/api/subtodos/999").body_json(&json!({"updateName": "x"})).send().await.assert_status(StatusCode::NOT_FOUND);

    cli.post(format!("/api/subtodos/{flight_id}")).send().await.assert_status(StatusCode::NO_CONTENT);
    cli.post(format!("/api/subtodos/{flight_id}")).send().await.assert_status(StatusCode::NOT_FOUND);
    cli.get(format!("/api/subtodos/{other_id}")).send().await.json().await.value().array().assert_len(0);

    // Cascade delete of the parent
    cli.delete(format!("/api/todos/{todo_id}")).send().await.assert_status(StatusCode::NO_CONTENT);
    cli.get(format!("/api/subtodos/{todo_id}")).send().await.json().await.value().array().assert_len(0);
    cli.get(format!("/api/subtodo/{pack_id}")).send().await.assert_status(StatusCode::NOT_FOUND);
    cli.get(format!("/api/todos/{todo_id}")).send().await.assert_status(StatusCode::NOT_FOUND);

    let resp = cli.post("/add_subtodo").body_json(&json!({"new-subtodo-name": "postcards", "parentId": other_id})).send().await;
    let postcards_id = resp.json().await.value().object().get("subtodoId").i64();
    cli.delete(format!("/api/subtodos/{postcards_id}")).send().await.assert_status(StatusCode::NO_CONTENT);
    cli.delete(format!("/api/subtodos/{postcards_id}")).send().await.assert_status(StatusCode::NOT_FOUND);
    cli.get("/api/subtodos").send().await.json().await.value().array().assert_len(0);

    Ok(())
}
