use crate::db::reldb_client::TodosActiveModel;
use crate::db::sea_orm::entity::prelude::*;
use crate::db::sea_orm::{ActiveModelBehavior, DbBackend};
use crate::db::sea_query::{ColumnDef, Table, TableCreateStatement};

/// Top-level task
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub prio: Option<i32>,
    pub deadline: Option<DateTime>,
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
            .col(ColumnDef::new(Column::Deadline).date_time().null());
        if db == DbBackend::MySql {
            statement.engine("InnoDB").character_set("utf8mb4");
        }
        statement.to_owned()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
