//! HTTP 层
//!
//! 把表单、列表和验证码暴露为 actix-web 路由，响应统一使用 `ApiResponse` 包装。

pub mod constants;
pub mod context;
pub mod error_code;
pub mod helpers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod types;

pub use error_code::ErrorCode;
pub use types::ApiResponse;
