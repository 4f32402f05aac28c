use std::future::Future;

use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mysql::Mysql;

use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;

pub struct TodosTestContainer;

impl TodosTestContainer {
    /// Run `fun` with the url of a throwaway MySQL database.
    ///
    /// With `TODOS_TEST_DISABLED_DOCKER` set, a local server on port 3306 is used instead.
    pub async fn mysql<F, T>(fun: F) -> TodosResult<()>
    where
        F: Fn(String) -> T + Send + Sync + 'static,
        T: Future<Output = TodosResult<()>> + Send + 'static,
    {
        if std::env::var_os("TODOS_TEST_DISABLED_DOCKER").is_some() {
            fun("mysql://root@127.0.0.1:3306/test".to_string()).await
        } else {
            let node = TodosTestContainer::mysql_custom().await?;
            let port = node.get_host_port_ipv4(3306).await.map_err(|e| TodosError::InternalError(format!("[Todos.TestContainer] Port acquisition error: {e}")))?;
            fun(format!("mysql://root@127.0.0.1:{port}/test")).await
        }
    }

    /// MySQL with an empty root password and a `test` database
    pub async fn mysql_custom() -> TodosResult<ContainerAsync<Mysql>> {
        Mysql::default().start().await.map_err(|e| TodosError::InternalError(format!("[Todos.TestContainer] Start mysql error: {e}")))
    }
}
