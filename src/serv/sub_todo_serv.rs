use tracing::info;

use crate::basic::error::TodosError;
use crate::basic::field::TodosField;
use crate::basic::result::TodosResult;
use crate::db::domain::{sub_to_do, todo};
use crate::db::reldb_client::{TodosRelDBClient, TodosRelDBConnection};
use crate::db::sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use crate::dto::sub_todo_dto::{SubTodoAddReq, SubTodoDetailResp};
use crate::dto::todo_dto::TodoModifyReq;

pub struct SubTodoServ;

impl SubTodoServ {
    pub async fn list_all(db: &TodosRelDBClient) -> TodosResult<Vec<SubTodoDetailResp>> {
        let sub_todos = db.conn().find_all(sub_to_do::Entity::find().order_by_asc(sub_to_do::Column::Id)).await?;
        Ok(sub_todos.into_iter().map(SubTodoDetailResp::from).collect())
    }

    /// Subtodos of one todo, empty for an unknown parent
    pub async fn list_by_parent(parent_id: i32, db: &TodosRelDBClient) -> TodosResult<Vec<SubTodoDetailResp>> {
        let sub_todos = db.conn().find_all(sub_to_do::Entity::find().filter(sub_to_do::Column::ParentId.eq(parent_id)).order_by_asc(sub_to_do::Column::Id)).await?;
        Ok(sub_todos.into_iter().map(SubTodoDetailResp::from).collect())
    }

    pub async fn get(id: i32, db: &TodosRelDBClient) -> TodosResult<SubTodoDetailResp> {
        Self::get_model(id, &db.conn()).await.map(SubTodoDetailResp::from)
    }

    pub async fn add(add_req: &SubTodoAddReq, db: &TodosRelDBClient) -> TodosResult<i32> {
        let name = TodosField.check_name(&add_req.name)?;
        let conn = db.conn();
        if conn.get_one(todo::Entity::find_by_id(add_req.parent_id)).await?.is_none() {
            return Err(TodosError::ParentNotFound(format!("[Todos.Serv] Parent todo {} not found", add_req.parent_id)));
        }
        let result = conn
            .insert_one(sub_to_do::ActiveModel {
                name: Set(name),
                description: Set(None),
                prio: Set(None),
                deadline: Set(None),
                parent_id: Set(add_req.parent_id),
                ..Default::default()
            })
            .await?;
        info!("[Todos.Serv] Added sub todo {} to todo {}", result.last_insert_id, add_req.parent_id);
        Ok(result.last_insert_id)
    }

    /// Overwrite every field of the subtodo, the parent is kept
    pub async fn modify(id: i32, modify_req: &TodoModifyReq, db: &TodosRelDBClient) -> TodosResult<SubTodoDetailResp> {
        let conn = db.conn();
        let sub_todo = Self::get_model(id, &conn).await?;
        let name = TodosField.check_name(&modify_req.update_name)?;
        let description = TodosField.check_description(modify_req.update_description.as_deref())?;
        let prio = TodosField.check_prio(modify_req.update_prio)?;
        let deadline = TodosField.check_deadline(modify_req.update_deadline.as_deref())?;
        conn.update_one(sub_to_do::ActiveModel {
            id: Set(id),
            name: Set(name),
            description: Set(description),
            prio: Set(prio),
            deadline: Set(deadline),
            parent_id: Set(sub_todo.parent_id),
        })
        .await?;
        info!("[Todos.Serv] Modified sub todo {}", id);
        Self::get_model(id, &conn).await.map(SubTodoDetailResp::from)
    }

    pub async fn complete(id: i32, db: &TodosRelDBClient) -> TodosResult<()> {
        Self::delete(id, db).await
    }

    pub async fn delete(id: i32, db: &TodosRelDBClient) -> TodosResult<()> {
        let deleted = db.conn().delete(sub_to_do::Entity::delete_by_id(id)).await?;
        if deleted == 0 {
            return Err(TodosError::NotFound(format!("[Todos.Serv] Sub todo {} not found", id)));
        }
        info!("[Todos.Serv] Deleted sub todo {}", id);
        Ok(())
    }

    async fn get_model(id: i32, conn: &TodosRelDBConnection<'_>) -> TodosResult<sub_to_do::Model> {
        conn.get_one(sub_to_do::Entity::find_by_id(id)).await?.ok_or_else(|| TodosError::NotFound(format!("[Todos.Serv] Sub todo {} not found", id)))
    }
}
