//! API 模块常量定义
//!
//! 包含 Cookie、请求头等相关的硬编码常量。

/// CSRF Token Cookie 名称
pub const CSRF_COOKIE_NAME: &str = "csrf_token";

/// CSRF Token 长度
pub const CSRF_TOKEN_LENGTH: usize = 32;

/// 请求 ID 响应头
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 表单请求体大小上限
pub const FORM_PAYLOAD_LIMIT: usize = 64 * 1024;
