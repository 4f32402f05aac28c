use std::time::Duration;

use sea_orm::sea_query::{IndexCreateStatement, TableCreateStatement};
use sea_orm::*;
use tracing::{info, trace, warn};
use url::Url;

use crate::basic::config::{DBConfig, TodosConfig};
use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;
use crate::db::domain::{sub_to_do, todo};

const IN_MEMORY_MAX_LIFETIME_SEC: u64 = 10 * 365 * 24 * 3600;

/// Relational database handle
///
/// Wraps a `sea-orm` connection pool for SQLite and MySQL. Every operation goes through a
/// [`TodosRelDBConnection`], which runs either directly on the pool or inside the
/// transaction opened by [`TodosRelDBConnection::begin`].
///
/// # Steps to use
///
/// 1. Create the database configuration, see [`DBConfig`]
/// 1. Initialize the client and the tables
/// ```ignore
/// let client = TodosRelDBClient::init(&DBConfig::builder().url("sqlite::memory:").build()).await?;
/// client.init_tables().await?;
/// ```
/// 1. Work with a connection
/// ```ignore
/// let mut conn = client.conn();
/// conn.begin().await?;
/// conn.insert_one(todo::ActiveModel {
///     name: Set("buy milk".to_string()),
///     ..Default::default()
/// }).await?;
/// conn.commit().await?;
/// ```
#[derive(Clone)]
pub struct TodosRelDBClient {
    con: DatabaseConnection,
}

impl TodosRelDBClient {
    /// Initialize from the application configuration
    pub async fn init_by_conf(conf: &TodosConfig) -> TodosResult<TodosRelDBClient> {
        TodosRelDBClient::init(&conf.db).await
    }

    pub async fn init(conf: &DBConfig) -> TodosResult<TodosRelDBClient> {
        let url = Url::parse(&conf.url).map_err(|_| TodosError::ValidationError(format!("[Todos.RelDBClient] Invalid url {}", conf.url)))?;
        info!(
            "[Todos.RelDBClient] Initializing, scheme:{}, host:{}, port:{}, max_connections:{}",
            url.scheme(),
            url.host_str().unwrap_or(""),
            url.port().unwrap_or(0),
            conf.max_connections
        );
        let mut opt = ConnectOptions::new(conf.url.clone());
        if TodosRelDBClient::is_sqlite_memory(&conf.url) {
            // All pooled connections share one in-memory database, a second connection deadlocks
            // against an open transaction and closing the last one drops the data.
            if conf.max_connections != 1 || conf.min_connections != 1 {
                warn!(
                    "[Todos.RelDBClient] In-memory SQLite uses a single connection, ignoring max_connections:{}, min_connections:{}",
                    conf.max_connections, conf.min_connections
                );
            }
            opt.max_connections(1).min_connections(1).max_lifetime(Duration::from_secs(IN_MEMORY_MAX_LIFETIME_SEC));
        } else {
            opt.max_connections(conf.max_connections).min_connections(conf.min_connections);
        }
        opt.sqlx_logging(conf.sqlx_logging);
        if let Some(connect_timeout_sec) = conf.connect_timeout_sec {
            opt.connect_timeout(Duration::from_secs(connect_timeout_sec));
        }
        if let Some(idle_timeout_sec) = conf.idle_timeout_sec {
            opt.idle_timeout(Duration::from_secs(idle_timeout_sec));
        }
        let con = Database::connect(opt).await?;
        info!(
            "[Todos.RelDBClient] Initialized, scheme:{}, host:{}, port:{}, min_connections:{}",
            url.scheme(),
            url.host_str().unwrap_or(""),
            url.port().unwrap_or(0),
            conf.min_connections
        );
        Ok(TodosRelDBClient { con })
    }

    /// `sqlite::memory:`, `sqlite://:memory:` or a `mode=memory` file url
    pub fn is_sqlite_memory(url: &str) -> bool {
        url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
    }

    /// Get database instance implementation
    pub fn backend(&self) -> DbBackend {
        self.con.get_database_backend()
    }

    /// Get database connection
    pub fn conn(&self) -> TodosRelDBConnection {
        TodosRelDBConnection { conn: &self.con, tx: None }
    }

    /// Create the `todo` and `sub_to_do` tables and their indexes if missing
    pub async fn init_tables(&self) -> TodosResult<()> {
        let mut conn = self.conn();
        conn.begin().await?;
        conn.create_table_and_index(&todo::ActiveModel::create_table_and_index_statement(self.backend())).await?;
        conn.create_table_and_index(&sub_to_do::ActiveModel::create_table_and_index_statement(self.backend())).await?;
        conn.commit().await?;
        info!("[Todos.RelDBClient] Tables initialized");
        Ok(())
    }

    pub(self) async fn create_table_inner<C>(statement: &TableCreateStatement, db: &C) -> TodosResult<()>
    where
        C: ConnectionTrait,
    {
        let statement = db.get_database_backend().build(statement);
        TodosRelDBClient::execute_inner(statement, db).await?;
        Ok(())
    }

    pub(self) async fn create_index_inner<C>(statements: &[IndexCreateStatement], db: &C) -> TodosResult<()>
    where
        C: ConnectionTrait,
    {
        for statement in statements {
            let statement = db.get_database_backend().build(statement);
            TodosRelDBClient::execute_inner(statement, db).await?;
        }
        Ok(())
    }

    pub(self) async fn execute_inner<C>(statement: Statement, db: &C) -> TodosResult<ExecResult>
    where
        C: ConnectionTrait,
    {
        trace!("[Todos.RelDBClient] Execute: {}", statement.sql);
        Ok(db.execute(statement).await?)
    }

    pub(self) async fn get_one_inner<E, C>(select: Select<E>, db: &C) -> TodosResult<Option<E::Model>>
    where
        C: ConnectionTrait,
        E: EntityTrait,
    {
        Ok(select.one(db).await?)
    }

    pub(self) async fn find_all_inner<E, C>(select: Select<E>, db: &C) -> TodosResult<Vec<E::Model>>
    where
        C: ConnectionTrait,
        E: EntityTrait,
    {
        Ok(select.all(db).await?)
    }

    pub(self) async fn insert_one_inner<T, C>(model: T, db: &C) -> TodosResult<InsertResult<T>>
    where
        C: ConnectionTrait,
        T: TodosActiveModel,
    {
        Ok(<T::Entity as EntityTrait>::insert(model).exec(db).await?)
    }

    pub(self) async fn update_one_inner<T, C>(model: T, db: &C) -> TodosResult<u64>
    where
        C: ConnectionTrait,
        T: TodosActiveModel,
    {
        let update = <T::Entity as EntityTrait>::update(model);
        let result = TodosRelDBClient::execute_inner(db.get_database_backend().build(update.as_query()), db).await?;
        Ok(result.rows_affected())
    }

    pub(self) async fn delete_inner<E, C>(delete: DeleteMany<E>, db: &C) -> TodosResult<u64>
    where
        C: ConnectionTrait,
        E: EntityTrait,
    {
        Ok(delete.exec(db).await?.rows_affected)
    }
}

/// Database operation connection object
pub struct TodosRelDBConnection<'a> {
    conn: &'a DatabaseConnection,
    tx: Option<DatabaseTransaction>,
}

impl<'a> TodosRelDBConnection<'a> {
    /// Get original connection (generally not recommended)
    pub fn raw_conn(&self) -> &DatabaseConnection {
        self.conn
    }

    pub fn has_tx(&self) -> bool {
        self.tx.is_some()
    }

    /// Open a transaction, subsequent operations on this connection run inside it
    pub async fn begin(&mut self) -> TodosResult<()> {
        self.tx = Some(self.conn.begin().await?);
        Ok(())
    }

    /// Commit current transaction
    pub async fn commit(self) -> TodosResult<()> {
        if let Some(tx) = self.tx {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Rollback current transaction
    pub async fn rollback(self) -> TodosResult<()> {
        if let Some(tx) = self.tx {
            tx.rollback().await?;
        }
        Ok(())
    }

    pub async fn create_table_and_index(&self, statements: &(TableCreateStatement, Vec<IndexCreateStatement>)) -> TodosResult<()> {
        self.create_table(&statements.0).await?;
        self.create_index(&statements.1).await
    }

    pub async fn create_table(&self, statement: &TableCreateStatement) -> TodosResult<()> {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::create_table_inner(statement, tx).await
        } else {
            TodosRelDBClient::create_table_inner(statement, self.conn).await
        }
    }

    pub async fn create_index(&self, statements: &[IndexCreateStatement]) -> TodosResult<()> {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::create_index_inner(statements, tx).await
        } else {
            TodosRelDBClient::create_index_inner(statements, self.conn).await
        }
    }

    /// Execute a custom statement
    pub async fn execute<S>(&self, statement: &S) -> TodosResult<ExecResult>
    where
        S: StatementBuilder,
    {
        let statement = self.conn.get_database_backend().build(statement);
        if let Some(tx) = &self.tx {
            TodosRelDBClient::execute_inner(statement, tx).await
        } else {
            TodosRelDBClient::execute_inner(statement, self.conn).await
        }
    }

    /// Get a record
    ///
    /// # Examples
    /// ```ignore
    /// let todo = conn.get_one(todo::Entity::find_by_id(1)).await?;
    /// ```
    pub async fn get_one<E>(&self, select: Select<E>) -> TodosResult<Option<E::Model>>
    where
        E: EntityTrait,
    {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::get_one_inner(select, tx).await
        } else {
            TodosRelDBClient::get_one_inner(select, self.conn).await
        }
    }

    /// Get all records matched by `select`
    ///
    /// # Examples
    /// ```ignore
    /// let children = conn.find_all(sub_to_do::Entity::find().filter(sub_to_do::Column::ParentId.eq(1))).await?;
    /// ```
    pub async fn find_all<E>(&self, select: Select<E>) -> TodosResult<Vec<E::Model>>
    where
        E: EntityTrait,
    {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::find_all_inner(select, tx).await
        } else {
            TodosRelDBClient::find_all_inner(select, self.conn).await
        }
    }

    /// Insert a record and return primary key value
    pub async fn insert_one<T>(&self, model: T) -> TodosResult<InsertResult<T>>
    where
        T: TodosActiveModel,
    {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::insert_one_inner(model, tx).await
        } else {
            TodosRelDBClient::insert_one_inner(model, self.conn).await
        }
    }

    /// Update a record by primary key, return the number of affected rows
    pub async fn update_one<T>(&self, model: T) -> TodosResult<u64>
    where
        T: TodosActiveModel,
    {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::update_one_inner(model, tx).await
        } else {
            TodosRelDBClient::update_one_inner(model, self.conn).await
        }
    }

    /// Delete records, return the number of affected rows
    ///
    /// # Examples
    /// ```ignore
    /// let deleted = conn.delete(todo::Entity::delete_by_id(1)).await?;
    /// ```
    pub async fn delete<E>(&self, delete: DeleteMany<E>) -> TodosResult<u64>
    where
        E: EntityTrait,
    {
        if let Some(tx) = &self.tx {
            TodosRelDBClient::delete_inner(delete, tx).await
        } else {
            TodosRelDBClient::delete_inner(delete, self.conn).await
        }
    }
}

/// Extension of `ActiveModelBehavior` carrying the table definition
pub trait TodosActiveModel: ActiveModelBehavior + Send {
    fn create_table_and_index_statement(db: DbBackend) -> (TableCreateStatement, Vec<IndexCreateStatement>) {
        (Self::create_table_statement(db), Self::create_index_statement(db))
    }

    fn create_table_statement(_: DbBackend) -> TableCreateStatement {
        TableCreateStatement::new()
    }

    fn create_index_statement(_: DbBackend) -> Vec<IndexCreateStatement> {
        vec![]
    }
}

impl From<DbErr> for TodosError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::RecordNotFound(msg) => TodosError::NotFound(msg),
            _ => TodosError::Box(Box::new(error)),
        }
    }
}
