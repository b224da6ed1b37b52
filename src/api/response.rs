//! JSON response envelope shared by all API handlers.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::LinkletError;

/// 统一 API 响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 业务错误码（与 HTTP 状态码独立）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    Validation = 1001,
    DuplicateCode = 1002,
    CollisionExhausted = 1003,
    NotFound = 1004,
    CsrfInvalid = 1403,
    Internal = 1500,
}

impl From<&LinkletError> for ErrorCode {
    fn from(err: &LinkletError) -> Self {
        match err {
            LinkletError::Validation(_) => ErrorCode::Validation,
            LinkletError::DuplicateCode(_) => ErrorCode::DuplicateCode,
            LinkletError::CollisionExhausted(_) => ErrorCode::CollisionExhausted,
            LinkletError::NotFound(_) => ErrorCode::NotFound,
            LinkletError::DatabaseConfig(_)
            | LinkletError::DatabaseConnection(_)
            | LinkletError::DatabaseOperation(_) => ErrorCode::Internal,
        }
    }
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkletError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 数据库错误只透出通用消息，不泄露内部细节。
pub fn error_from_linklet(err: &LinkletError) -> HttpResponse {
    let status = err.http_status();
    let code = ErrorCode::from(err);

    let message = if code == ErrorCode::Internal {
        "Internal server error"
    } else {
        err.message()
    };

    error_response(status, code, message)
}
