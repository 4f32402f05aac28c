use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::basic::field::TodosField;
use crate::db::domain::todo;

#[derive(Object, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoDetailResp {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub prio: Option<i32>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub deadline: Option<String>,
}

impl From<todo::Model> for TodoDetailResp {
    fn from(model: todo::Model) -> Self {
        TodoDetailResp {
            id: model.id,
            name: model.name,
            description: model.description,
            prio: model.prio,
            deadline: model.deadline.as_ref().map(|deadline| TodosField.format_datetime(deadline)),
        }
    }
}

#[derive(Object, Serialize, Deserialize, Debug, Clone)]
pub struct TodoAddReq {
    #[oai(validator(min_length = "1", max_length = "255"))]
    pub name: String,
}

#[derive(Object, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct TodoAddResp {
    pub todo_id: i32,
}

/// Form posted by the index page
#[derive(Object, Serialize, Deserialize, Debug, Clone)]
pub struct TodoAddForm {
    pub new_todo: String,
}

/// Full overwrite of a todo or subtodo
///
/// Absent, null or empty optional fields clear the stored value.
#[derive(Object, Serialize, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct TodoModifyReq {
    pub update_name: String,
    pub update_description: Option<String>,
    /// 1..=3, 4 or null for none
    pub update_prio: Option<i32>,
    pub update_deadline: Option<String>,
}
