//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::cookie::time::Duration;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::api::constants;
use crate::config::SameSitePolicy;
use crate::errors::SuiteError;
use crate::services::Session;

use super::error_code::ErrorCode;
use super::types::{ApiResponse, ValidationErrors};

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

/// 从 SuiteError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 验证错误额外在 data 中返回每条消息。
pub fn error_from_suite(err: &SuiteError) -> HttpResponse {
    let status = err.http_status();
    let code = ErrorCode::from(err);
    match err {
        SuiteError::Validation(errors) => json_response(
            status,
            code,
            err.message(),
            Some(ValidationErrors {
                errors: errors.clone(),
            }),
        ),
        _ => error_response(status, code, &err.message()),
    }
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, SuiteError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_suite(&e),
    }
}

/// Cookie 构建器
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    domain: Option<String>,
    session_cookie_name: String,
    session_minutes: u64,
    remember_days: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let same_site = match config.session.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.session.cookie_secure,
            domain: config.session.cookie_domain.clone(),
            session_cookie_name: config.session.cookie_name.clone(),
            session_minutes: config.session.session_minutes,
            remember_days: config.session.remember_days,
        }
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    fn build_cookie_base(
        &self,
        name: String,
        value: String,
        http_only: bool,
        max_age: Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/");
        cookie.set_http_only(http_only);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    /// 访客会话 cookie，用于在登录前关联验证码
    pub fn build_visitor_cookie(&self, session_id: String) -> Cookie<'static> {
        self.build_cookie_base(
            self.session_cookie_name.clone(),
            session_id,
            true,
            Duration::minutes(self.session_minutes as i64),
        )
    }

    /// 登录会话 cookie，持久会话使用更长的有效期
    pub fn build_session_cookie(&self, session: &Session) -> Cookie<'static> {
        let max_age = if session.remember {
            Duration::days(self.remember_days as i64)
        } else {
            Duration::minutes(self.session_minutes as i64)
        };
        self.build_cookie_base(self.session_cookie_name.clone(), session.id.clone(), true, max_age)
    }

    /// 构建 CSRF Cookie（非 HttpOnly，前端需要读取）
    pub fn build_csrf_cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = self.build_cookie_base(
            constants::CSRF_COOKIE_NAME.to_string(),
            token,
            false,
            Duration::minutes(self.session_minutes as i64),
        );
        // CSRF cookie 使用 Lax，允许顶级导航携带但防止跨站请求
        cookie.set_same_site(SameSite::Lax);
        cookie
    }
}
