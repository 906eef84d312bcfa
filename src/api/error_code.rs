//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::SuiteError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 表单错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    NotImplemented = 1006,

    // 认证错误 2000-2099
    UserConflict = 2001,

    // 表单错误 3000-3099
    ValidationFailed = 3000,
}

impl From<&SuiteError> for ErrorCode {
    fn from(err: &SuiteError) -> Self {
        match err {
            SuiteError::BadRequest(_) => ErrorCode::BadRequest,
            SuiteError::Validation(_) => ErrorCode::ValidationFailed,
            SuiteError::Unauthorized(_) => ErrorCode::Unauthorized,
            SuiteError::Forbidden(_) => ErrorCode::Forbidden,
            SuiteError::NotFound(_) => ErrorCode::NotFound,
            SuiteError::Conflict(_) => ErrorCode::UserConflict,
            SuiteError::NotImplemented(_) => ErrorCode::NotImplemented,
            SuiteError::Config(_)
            | SuiteError::PasswordHash(_)
            | SuiteError::Serialization(_)
            | SuiteError::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::ValidationFailed).unwrap(), "3000");
        assert_eq!(
            ErrorCode::from(&SuiteError::conflict("taken")),
            ErrorCode::UserConflict
        );
    }
}
