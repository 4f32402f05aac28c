use poem::http::StatusCode;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};
use tracing::{trace, warn};

use crate::basic::error::TodosError;

use super::web_resp::{mapping_http_code_to_error, TodosErrorResp};

/// Render every error response as `{"code": .., "msg": ..}`, keeping the HTTP status
pub struct UniformError {
    security_hide_err_msg: bool,
}

impl UniformError {
    pub fn new(security_hide_err_msg: bool) -> UniformError {
        UniformError { security_hide_err_msg }
    }
}

impl<E: Endpoint> Middleware<E> for UniformError {
    type Output = UniformErrorImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        UniformErrorImpl {
            ep,
            security_hide_err_msg: self.security_hide_err_msg,
        }
    }
}

pub struct UniformErrorImpl<E> {
    ep: E,
    security_hide_err_msg: bool,
}

impl<E: Endpoint> Endpoint for UniformErrorImpl<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let method = req.method().to_string();
        let url = req.uri().to_string();
        trace!("[Todos.WebServer] Request {} {}", method, url);
        let (http_code, msg) = match self.ep.call(req).await {
            Ok(resp) => {
                let mut resp = resp.into_response();
                if resp.status().as_u16() < 400 {
                    return Ok(resp);
                }
                let msg = resp.take_body().into_string().await?;
                (resp.status(), msg)
            }
            Err(error) => (error.status(), error.to_string()),
        };
        let error = mapping_http_code_to_error(http_code, &msg).unwrap_or_else(|| TodosError::InternalError(msg.clone()));
        if http_code.is_server_error() {
            warn!(
                "[Todos.WebServer] Process error,request method:{}, url:{}, response code:{}, message:{}",
                method,
                url,
                http_code.as_u16(),
                error
            );
        } else {
            trace!(
                "[Todos.WebServer] Process error,request method:{}, url:{}, response code:{}, message:{}",
                method,
                url,
                http_code.as_u16(),
                error
            );
        }
        Ok(error_response(http_code, &error, self.security_hide_err_msg))
    }
}

fn error_response(http_code: StatusCode, error: &TodosError, security_hide_err_msg: bool) -> Response {
    let msg = if security_hide_err_msg {
        "[Todos.WebServer] Security is enabled, detailed errors are hidden, please check the server logs".to_string()
    } else {
        error.message()
    };
    let body = TodosErrorResp {
        code: error.code().to_string(),
        msg,
    };
    Response::builder().status(http_code).content_type("application/json; charset=utf8").body(serde_json::to_string(&body).unwrap_or_default())
}
