use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::basic::error::TodosError;
use crate::basic::result::TodosResult;

lazy_static! {
    static ref INITIALIZED: Mutex<bool> = Mutex::new(false);
}

pub struct TodosLogger;

impl TodosLogger {
    /// Install the global subscriber once, `RUST_LOG` defaults to `info`.
    pub fn init() -> TodosResult<()> {
        let mut initialized = INITIALIZED.lock().map_err(|e| TodosError::InternalError(format!("[Todos.Logger] Lock error: {e}")))?;
        if *initialized {
            return Ok(());
        }
        *initialized = true;

        if std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var("RUST_LOG", "info");
        }

        // Ignore an already installed subscriber
        let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
        Ok(())
    }
}
