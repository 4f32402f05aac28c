use std::collections::HashMap;

use poem::handler;
use poem::web::{Data, Form, Html, Json, Redirect};
use serde_json::Value;

use crate::db::reldb_client::TodosRelDBClient;
use crate::dto::sub_todo_dto::{SubTodoAddReq, SubTodoAddResp, SubTodoDetailResp};
use crate::dto::todo_dto::{TodoAddForm, TodoDetailResp};
use crate::serv::sub_todo_serv::SubTodoServ;
use crate::serv::todo_serv::TodoServ;

/// Index page listing every todo with its sub todos
#[handler]
pub async fn index(db: Data<&TodosRelDBClient>) -> poem::Result<Html<String>> {
    let todos = TodoServ::list(db.0).await?;
    let mut sub_todos: HashMap<i32, Vec<SubTodoDetailResp>> = HashMap::new();
    for sub_todo in SubTodoServ::list_all(db.0).await? {
        sub_todos.entry(sub_todo.parent_id).or_default().push(sub_todo);
    }
    Ok(Html(render_index(&todos, &sub_todos)))
}

/// Form submit of the index page, redirects back to it
#[handler]
pub async fn add_todo(Form(form): Form<TodoAddForm>, db: Data<&TodosRelDBClient>) -> poem::Result<Redirect> {
    TodoServ::add(&form.new_todo, db.0).await?;
    Ok(Redirect::see_other("/"))
}

#[handler]
pub async fn add_subtodo(Json(body): Json<Value>, db: Data<&TodosRelDBClient>) -> poem::Result<Json<SubTodoAddResp>> {
    let add_req = SubTodoAddReq::from_json(&body)?;
    let subtodo_id = SubTodoServ::add(&add_req, db.0).await?;
    Ok(Json(SubTodoAddResp { subtodo_id }))
}

fn render_index(todos: &[TodoDetailResp], sub_todos: &HashMap<i32, Vec<SubTodoDetailResp>>) -> String {
    let mut items = String::new();
    for todo in todos {
        items.push_str(&format!(
            r#"<li data-id="{id}"><span class="name">{name}</span>{details}"#,
            id = todo.id,
            name = escape_html(&todo.name),
            details = render_details(todo.description.as_deref(), todo.prio, todo.deadline.as_deref()),
        ));
        if let Some(children) = sub_todos.get(&todo.id) {
            items.push_str("<ul class=\"subtodos\">");
            for child in children {
                items.push_str(&format!(
                    r#"<li data-id="{id}" data-parent-id="{parent_id}"><span class="name">{name}</span>{details}</li>"#,
                    id = child.id,
                    parent_id = child.parent_id,
                    name = escape_html(&child.name),
                    details = render_details(child.description.as_deref(), child.prio, child.deadline.as_deref()),
                ));
            }
            items.push_str("</ul>");
        }
        items.push_str("</li>");
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Todos</title></head>
<body>
<h1>Todos</h1>
<form method="post" action="/add_todo">
<input type="text" name="new_todo" maxlength="255" required>
<button type="submit">Add</button>
</form>
<ul class="todos">{items}</ul>
</body>
</html>"#
    )
}

fn render_details(description: Option<&str>, prio: Option<i32>, deadline: Option<&str>) -> String {
    let mut details = String::new();
    if let Some(description) = description {
        details.push_str(&format!(r#" <span class="description">{}</span>"#, escape_html(description)));
    }
    if let Some(prio) = prio {
        details.push_str(&format!(r#" <span class="prio">{prio}</span>"#));
    }
    if let Some(deadline) = deadline {
        details.push_str(&format!(r#" <span class="deadline">{}</span>"#, escape_html(deadline)));
    }
    details
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
