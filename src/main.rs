use todos::basic::result::TodosResult;
use todos::TodosApp;

///
/// Visit: http://127.0.0.1:8080/ and http://127.0.0.1:8080/api/ui
///
#[tokio::main]
async fn main() -> TodosResult<()> {
    let app = TodosApp::init("config").await?;
    app.start().await
}
