//! API 层
//!
//! HTTP 路由、请求校验与响应转换

mod handlers;
mod routes;

pub use routes::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ProductOutcome;

impl IntoResponse for ProductOutcome {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::OK);
        (status, self.message()).into_response()
    }
}
