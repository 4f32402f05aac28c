use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::basic::error::TodosError;
use crate::basic::field::TodosField;
use crate::basic::result::TodosResult;
use crate::db::domain::sub_to_do;

#[derive(Object, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SubTodoDetailResp {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub prio: Option<i32>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub deadline: Option<String>,
    pub parent_id: i32,
}

impl From<sub_to_do::Model> for SubTodoDetailResp {
    fn from(model: sub_to_do::Model) -> Self {
        SubTodoDetailResp {
            id: model.id,
            name: model.name,
            description: model.description,
            prio: model.prio,
            deadline: model.deadline.as_ref().map(|deadline| TodosField.format_datetime(deadline)),
            parent_id: model.parent_id,
        }
    }
}

pub const SUB_TODO_ADD_NAME_FIELD: &str = "new-subtodo-name";
pub const SUB_TODO_ADD_PARENT_FIELD: &str = "parentId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTodoAddReq {
    pub name: String,
    pub parent_id: i32,
}

impl SubTodoAddReq {
    /// Read `{"new-subtodo-name": .., "parentId": ..}`, `parentId` may be a number or a numeric string.
    ///
    /// A `parentId` of zero or below counts as missing.
    pub fn from_json(body: &Value) -> TodosResult<SubTodoAddReq> {
        let name = body
            .get(SUB_TODO_ADD_NAME_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| TodosError::ValidationError(format!("[Todos.SubTodo] Missing field {SUB_TODO_ADD_NAME_FIELD}")))?;
        let parent_id = match body.get(SUB_TODO_ADD_PARENT_FIELD) {
            Some(Value::Number(number)) => number.as_i64().and_then(|id| i32::try_from(id).ok()),
            Some(Value::String(id)) => id.trim().parse::<i32>().ok(),
            _ => None,
        }
        .filter(|id| *id > 0)
        .ok_or_else(|| TodosError::ValidationError(format!("[Todos.SubTodo] Missing or invalid field {SUB_TODO_ADD_PARENT_FIELD}")))?;
        Ok(SubTodoAddReq {
            name: name.to_string(),
            parent_id,
        })
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            SUB_TODO_ADD_NAME_FIELD: self.name,
            SUB_TODO_ADD_PARENT_FIELD: self.parent_id,
        })
    }
}

#[derive(Object, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct SubTodoAddResp {
    pub subtodo_id: i32,
}
