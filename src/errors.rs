use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum SuiteError {
    BadRequest(String),
    Validation(Vec<String>),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    NotImplemented(String),
    Config(String),
    PasswordHash(String),
    Serialization(String),
    Internal(String),
}

impl SuiteError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SuiteError::BadRequest(_) => "E001",
            SuiteError::Validation(_) => "E002",
            SuiteError::Unauthorized(_) => "E003",
            SuiteError::Forbidden(_) => "E004",
            SuiteError::NotFound(_) => "E005",
            SuiteError::Conflict(_) => "E006",
            SuiteError::NotImplemented(_) => "E007",
            SuiteError::Config(_) => "E008",
            SuiteError::PasswordHash(_) => "E009",
            SuiteError::Serialization(_) => "E010",
            SuiteError::Internal(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SuiteError::BadRequest(_) => "Bad Request",
            SuiteError::Validation(_) => "Validation Error",
            SuiteError::Unauthorized(_) => "Unauthorized",
            SuiteError::Forbidden(_) => "Forbidden",
            SuiteError::NotFound(_) => "Resource Not Found",
            SuiteError::Conflict(_) => "Conflict",
            SuiteError::NotImplemented(_) => "Not Implemented",
            SuiteError::Config(_) => "Configuration Error",
            SuiteError::PasswordHash(_) => "Password Hash Error",
            SuiteError::Serialization(_) => "Serialization Error",
            SuiteError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    ///
    /// Validation errors are joined one message per line.
    pub fn message(&self) -> String {
        match self {
            SuiteError::Validation(messages) => messages.join("\n"),
            SuiteError::BadRequest(msg)
            | SuiteError::Unauthorized(msg)
            | SuiteError::Forbidden(msg)
            | SuiteError::NotFound(msg)
            | SuiteError::Conflict(msg)
            | SuiteError::NotImplemented(msg)
            | SuiteError::Config(msg)
            | SuiteError::PasswordHash(msg)
            | SuiteError::Serialization(msg)
            | SuiteError::Internal(msg) => msg.clone(),
        }
    }

    /// HTTP status the error maps to when it reaches a handler
    pub fn http_status(&self) -> StatusCode {
        match self {
            SuiteError::BadRequest(_) | SuiteError::Validation(_) => StatusCode::BAD_REQUEST,
            SuiteError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SuiteError::Forbidden(_) => StatusCode::FORBIDDEN,
            SuiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SuiteError::Conflict(_) => StatusCode::CONFLICT,
            SuiteError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            SuiteError::Config(_)
            | SuiteError::PasswordHash(_)
            | SuiteError::Serialization(_)
            | SuiteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SuiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SuiteError {}

// 便捷的构造函数
impl SuiteError {
    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        SuiteError::BadRequest(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SuiteError::Validation(vec![msg.into()])
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        SuiteError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        SuiteError::Forbidden(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SuiteError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        SuiteError::Conflict(msg.into())
    }

    pub fn not_implemented<T: Into<String>>(msg: T) -> Self {
        SuiteError::NotImplemented(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SuiteError::Config(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        SuiteError::PasswordHash(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        SuiteError::Internal(msg.into())
    }
}

impl From<serde_json::Error> for SuiteError {
    fn from(err: serde_json::Error) -> Self {
        SuiteError::Serialization(err.to_string())
    }
}

impl From<regex::Error> for SuiteError {
    fn from(err: regex::Error) -> Self {
        SuiteError::Config(format!("Invalid regular expression: {}", err))
    }
}

impl From<crate::utils::password::PasswordError> for SuiteError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        SuiteError::PasswordHash(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SuiteError>;
