//! API 层常量

/// 双提交 CSRF Cookie 名称
pub const CSRF_COOKIE_NAME: &str = "csrf_token";

/// CSRF 请求头名称
pub const CSRF_HEADER_NAME: &str = "X-CSRF-Token";

/// CSRF token 有效期（秒）
pub const CSRF_TOKEN_MAX_AGE_SECS: i64 = 3600;
