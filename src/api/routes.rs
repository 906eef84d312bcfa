//! 路由配置
//!
//! 按前缀拆分为用户、后台、验证码和健康检查路由。

use actix_web::web;

use super::constants::FORM_PAYLOAD_LIMIT;
use super::services::{captcha_image, get_form, health_routes, list_page, post_form, user_menu};
use crate::config::RoutesConfig;
use crate::plugins::{TestPaymentForm, UserRegForm, UserSessionsList};
use crate::runtime::lifetime::startup::StartupContext;

/// 用户路由
///
/// 包含：
/// - GET/POST /reg - 用户注册
/// - GET /menu - 用户中心菜单
/// - GET /sessions - 登录会话列表
pub fn user_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("/reg", web::get().to(get_form::<UserRegForm>))
        .route("/reg", web::post().to(post_form::<UserRegForm>))
        .route("/menu", web::get().to(user_menu))
        .route("/sessions", web::get().to(list_page::<UserSessionsList>))
}

/// 后台路由
///
/// 包含：
/// - GET/POST /payment_apis/test?id= - 测试支付接口
pub fn admin_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route(
            "/payment_apis/test",
            web::get().to(get_form::<TestPaymentForm>),
        )
        .route(
            "/payment_apis/test",
            web::post().to(post_form::<TestPaymentForm>),
        )
}

/// 验证码路由 `/captcha/{key}`
pub fn captcha_routes() -> actix_web::Scope {
    web::scope("/captcha").route("/{key}", web::get().to(captcha_image))
}

/// 注册全部共享数据和路由
pub fn configure_app(cfg: &mut web::ServiceConfig, startup: &StartupContext, routes: &RoutesConfig) {
    cfg.app_data(web::Data::new(startup.services.clone()))
        .app_data(web::Data::new(startup.captcha.clone()))
        .app_data(web::Data::from(startup.sessions_list.clone()))
        .app_data(web::Data::new(startup.menu.clone()))
        .app_data(web::Data::new(startup.start_time.clone()))
        .app_data(web::FormConfig::default().limit(FORM_PAYLOAD_LIMIT))
        .service(user_routes(&routes.user_prefix))
        .service(admin_routes(&routes.admin_prefix))
        .service(captcha_routes())
        .service(health_routes(&routes.health_prefix));
}
