use crate::db::domain::todo;
use crate::db::reldb_client::TodosActiveModel;
use crate::db::sea_orm::entity::prelude::*;
use crate::db::sea_orm::{ActiveModelBehavior, DbBackend};
use crate::db::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, Table, TableCreateStatement};

const PARENT_ID_INDEX: &str = "idx-sub_to_do-parent_id";

/// Subtask, always owned by one [`todo::Model`]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sub_to_do")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub prio: Option<i32>,
    pub deadline: Option<DateTime>,
    #[sea_orm(indexed)]
    pub parent_id: i32,
}

impl TodosActiveModel for ActiveModel {
    fn create_table_statement(db: DbBackend) -> TableCreateStatement {
        let mut statement = Table::create();
        statement
            .table(Entity.table_ref())
            .if_not_exists()
            .col(ColumnDef::new(Column::Id).integer().not_null().auto_increment().primary_key())
            .col(ColumnDef::new(Column::Name).string_len(255).not_null())
            .col(ColumnDef::new(Column::Description).string_len(255).null())
            .col(ColumnDef::new(Column::Prio).integer().null())
            .col(ColumnDef::new(Column::Deadline).date_time().null())
            .col(ColumnDef::new(Column::ParentId).integer().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk-sub_to_do-parent_id")
                    .from(Entity, Column::ParentId)
                    .to(todo::Entity, todo::Column::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        // MySQL has no `CREATE INDEX IF NOT EXISTS`, the index is declared with the table
        if db == DbBackend::MySql {
            statement.engine("InnoDB").character_set("utf8mb4").index(Index::create().name(PARENT_ID_INDEX).col(Column::ParentId));
        }
        statement.to_owned()
    }

    fn create_index_statement(db: DbBackend) -> Vec<IndexCreateStatement> {
        match db {
            DbBackend::MySql => vec![],
            _ => vec![Index::create().name(PARENT_ID_INDEX).table(Entity).col(Column::ParentId).if_not_exists().to_owned()],
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
