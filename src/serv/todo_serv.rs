use tracing::{info, warn};

use crate::basic::error::TodosError;
use crate::basic::field::TodosField;
use crate::basic::result::TodosResult;
use crate::db::domain::{sub_to_do, todo};
use crate::db::reldb_client::{TodosRelDBClient, TodosRelDBConnection};
use crate::db::sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use crate::dto::todo_dto::{TodoDetailResp, TodoModifyReq};

pub struct TodoServ;

impl TodoServ {
    pub async fn list(db: &TodosRelDBClient) -> TodosResult<Vec<TodoDetailResp>> {
        let todos = db.conn().find_all(todo::Entity::find().order_by_asc(todo::Column::Id)).await?;
        Ok(todos.into_iter().map(TodoDetailResp::from).collect())
    }

    pub async fn get(id: i32, db: &TodosRelDBClient) -> TodosResult<TodoDetailResp> {
        Self::get_model(id, &db.conn()).await.map(TodoDetailResp::from)
    }

    pub async fn add(name: &str, db: &TodosRelDBClient) -> TodosResult<i32> {
        let name = TodosField.check_name(name)?;
        let result = db
            .conn()
            .insert_one(todo::ActiveModel {
                name: Set(name),
                description: Set(None),
                prio: Set(None),
                deadline: Set(None),
                ..Default::default()
            })
            .await?;
        info!("[Todos.Serv] Added todo {}", result.last_insert_id);
        Ok(result.last_insert_id)
    }

    /// Overwrite every field of the todo
    pub async fn modify(id: i32, modify_req: &TodoModifyReq, db: &TodosRelDBClient) -> TodosResult<TodoDetailResp> {
        let conn = db.conn();
        Self::get_model(id, &conn).await?;
        let name = TodosField.check_name(&modify_req.update_name)?;
        let description = TodosField.check_description(modify_req.update_description.as_deref())?;
        let prio = TodosField.check_prio(modify_req.update_prio)?;
        let deadline = TodosField.check_deadline(modify_req.update_deadline.as_deref())?;
        conn.update_one(todo::ActiveModel {
            id: Set(id),
            name: Set(name),
            description: Set(description),
            prio: Set(prio),
            deadline: Set(deadline),
        })
        .await?;
        info!("[Todos.Serv] Modified todo {}", id);
        Self::get_model(id, &conn).await.map(TodoDetailResp::from)
    }

    /// Completing a todo removes it together with its subtodos
    pub async fn complete(id: i32, db: &TodosRelDBClient) -> TodosResult<()> {
        Self::delete(id, db).await
    }

    /// Delete the todo and all of its subtodos in one transaction
    pub async fn delete(id: i32, db: &TodosRelDBClient) -> TodosResult<()> {
        let mut conn = db.conn();
        conn.begin().await?;
        match Self::delete_with_children(id, &conn).await {
            Ok(children) => {
                conn.commit().await?;
                info!("[Todos.Serv] Deleted todo {} with {} sub todos", id, children);
                Ok(())
            }
            Err(error) => {
                warn!("[Todos.Serv] Delete todo {} failed, rolling back: {}", id, error);
                if let Err(rollback_error) = conn.rollback().await {
                    warn!("[Todos.Serv] Rollback of todo {} delete failed: {}", id, rollback_error);
                }
                Err(error)
            }
        }
    }

    async fn delete_with_children(id: i32, conn: &TodosRelDBConnection<'_>) -> TodosResult<usize> {
        Self::get_model(id, conn).await?;
        let children = conn.find_all(sub_to_do::Entity::find().filter(sub_to_do::Column::ParentId.eq(id)).order_by_asc(sub_to_do::Column::Id)).await?;
        for child in &children {
            if conn.delete(sub_to_do::Entity::delete_by_id(child.id)).await? != 1 {
                return Err(TodosError::InternalError(format!("[Todos.Serv] Sub todo {} of todo {} could not be deleted", child.id, id)));
            }
        }
        if conn.delete(todo::Entity::delete_by_id(id)).await? != 1 {
            return Err(TodosError::InternalError(format!("[Todos.Serv] Todo {} could not be deleted", id)));
        }
        Ok(children.len())
    }

    async fn get_model(id: i32, conn: &TodosRelDBConnection<'_>) -> TodosResult<todo::Model> {
        conn.get_one(todo::Entity::find_by_id(id)).await?.ok_or_else(|| TodosError::NotFound(format!("[Todos.Serv] Todo {} not found", id)))
    }
}
