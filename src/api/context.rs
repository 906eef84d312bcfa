//! 从 HTTP 请求构造 `RequestContext`
//!
//! 读取查询参数、会话 cookie 和 CSRF cookie；缺失的 cookie 会在响应中补发。

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::api::constants::{CSRF_COOKIE_NAME, CSRF_TOKEN_LENGTH};
use crate::api::helpers::CookieBuilder;
use crate::services::{RequestContext, Services};
use crate::utils::{ALPHANUMERIC, random_string};

/// 请求上下文以及需要写回的 cookie
pub struct HttpContext {
    pub ctx: RequestContext,
    cookies: Vec<Cookie<'static>>,
    cookie_builder: CookieBuilder,
}

impl HttpContext {
    /// 构造上下文
    ///
    /// `issue_csrf` 为 true 时，请求没有 CSRF cookie 则生成新的令牌。
    pub async fn from_request(req: &HttpRequest, services: &Arc<Services>, issue_csrf: bool) -> Self {
        let cookie_builder = CookieBuilder::from_config();
        let mut cookies = Vec::new();

        let params: HashMap<String, String> =
            web::Query::<HashMap<String, String>>::from_query(req.query_string())
                .map(web::Query::into_inner)
                .unwrap_or_default();

        let session_id = match cookie_value(req, cookie_builder.session_cookie_name()) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                trace!("Issuing visitor session {}", id);
                cookies.push(cookie_builder.build_visitor_cookie(id.clone()));
                id
            }
        };
        let user = services.users.session_user(&session_id).await;

        let csrf_token = match cookie_value(req, CSRF_COOKIE_NAME) {
            Some(token) => Some(token),
            None if issue_csrf => {
                let token = random_string(CSRF_TOKEN_LENGTH, ALPHANUMERIC);
                cookies.push(cookie_builder.build_csrf_cookie(token.clone()));
                Some(token)
            }
            None => None,
        };

        let ctx = RequestContext::new(Arc::clone(services))
            .with_params(params)
            .with_session_id(Some(session_id))
            .with_csrf_token(csrf_token)
            .with_user(user);

        Self {
            ctx,
            cookies,
            cookie_builder,
        }
    }

    /// 写入补发的 cookie 以及处理过程中登录产生的会话 cookie
    pub fn finish(self, mut response: HttpResponse) -> HttpResponse {
        let login = self
            .ctx
            .take_login()
            .map(|session| self.cookie_builder.build_session_cookie(&session));

        for cookie in self.cookies.iter().chain(login.iter()) {
            if let Err(e) = response.add_cookie(cookie) {
                warn!("Failed to set cookie '{}': {}", cookie.name(), e);
            }
        }
        response
    }
}

fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}
