//! HTTP 集成测试
//!
//! 通过 actix-web 测试服务调用完整路由，覆盖注册、会话列表、支付测试和健康检查。

use std::collections::HashMap;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::Value;

use formsuite::api::constants::{CSRF_COOKIE_NAME, REQUEST_ID_HEADER};
use formsuite::api::middleware::RequestIdMiddleware;
use formsuite::api::routes::configure_app;
use formsuite::config::{StaticConfig, get_config};
use formsuite::forms::CSRF_TOKEN_FIELD;
use formsuite::plugins::USER_REG_CAPTCHA_KEY;
use formsuite::runtime::lifetime::startup::{StartupContext, prepare_server_startup};
use formsuite::services::{UserManager, UserTypes};

// =============================================================================
// 测试环境初始化
// =============================================================================

fn startup() -> StartupContext {
    prepare_server_startup(&StaticConfig::default())
}

macro_rules! init_app {
    ($startup:expr) => {{
        let startup = $startup.clone();
        let routes = get_config().routes.clone();
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(move |cfg| configure_app(cfg, &startup, &routes)),
        )
        .await
    }};
}

fn session_cookie_name() -> String {
    get_config().session.cookie_name.clone()
}

/// 注册一个管理员并返回其会话 id
async fn admin_session(startup: &StartupContext) -> String {
    startup.users.register("root", "secret-pass").await.unwrap();
    startup
        .users
        .set_role("root", UserTypes::Admin, Vec::new())
        .unwrap();
    startup.users.login("root", "secret-pass", false).await.unwrap().id
}

fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .filter(|c| c.name() == name)
        .last()
        .map(|c| c.value().to_string())
}

// =============================================================================
// 注册流程
// =============================================================================

#[cfg(test)]
mod registration_tests {
    use super::*;

    #[actix_rt::test]
    async fn test_register_then_list_sessions() {
        let startup = startup();
        let app = init_app!(startup);

        // GET 表单，得到访客会话和 CSRF cookie
        let resp = test::call_service(&app, TestRequest::get().uri("/user/reg").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
        let visitor = response_cookie(&resp, &session_cookie_name()).expect("visitor cookie");
        let csrf = response_cookie(&resp, CSRF_COOKIE_NAME).expect("csrf cookie");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["form"]["attribute"]["name"], "UserRegForm");
        assert_eq!(body["data"]["form"]["fields"].as_array().map(Vec::len), Some(4));

        // 验证码图片
        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/captcha/{}", USER_REG_CAPTCHA_KEY))
                .cookie(Cookie::new(session_cookie_name(), visitor.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("image/svg+xml")
        );

        let code = startup.captcha.issue(&visitor, USER_REG_CAPTCHA_KEY);
        let form = HashMap::from([
            (CSRF_TOKEN_FIELD, csrf.clone()),
            ("Username", "alice".to_string()),
            ("Password", "secret-pass".to_string()),
            ("ConfirmPassword", "secret-pass".to_string()),
            ("Captcha", code),
        ]);
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/user/reg")
                .cookie(Cookie::new(session_cookie_name(), visitor.clone()))
                .cookie(Cookie::new(CSRF_COOKIE_NAME, csrf.clone()))
                .set_form(&form)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let session = response_cookie(&resp, &session_cookie_name()).expect("session cookie");
        assert_ne!(session, visitor);

        // 登录后访问会话列表
        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/user/sessions?page=1&page_size=10")
                .cookie(Cookie::new(session_cookie_name(), session.clone()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["template_path"], "common.user_panel/generic_list.html");
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["rows"][0]["current"], true);

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/user/menu")
                .cookie(Cookie::new(session_cookie_name(), session))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["items"][0]["url"], "/user/sessions");
    }

    #[actix_rt::test]
    async fn test_post_without_csrf_is_forbidden() {
        let startup = startup();
        let app = init_app!(startup);

        let form = HashMap::from([("Username", "bob"), ("Password", "secret-pass")]);
        let resp = test::call_service(
            &app,
            TestRequest::post().uri("/user/reg").set_form(&form).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1003);
    }

    #[actix_rt::test]
    async fn test_validation_failure_lists_errors() {
        let startup = startup();
        let app = init_app!(startup);

        let form = HashMap::from([(CSRF_TOKEN_FIELD, "t"), ("Username", "bob")]);
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/user/reg")
                .cookie(Cookie::new(CSRF_COOKIE_NAME, "t"))
                .set_form(&form)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3000);
        assert_eq!(body["data"]["errors"].as_array().map(Vec::len), Some(3));
    }

    #[actix_rt::test]
    async fn test_sessions_require_login() {
        let startup = startup();
        let app = init_app!(startup);

        let resp =
            test::call_service(&app, TestRequest::get().uri("/user/sessions").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1001);
    }
}

// =============================================================================
// 支付接口测试表单
// =============================================================================

#[cfg(test)]
mod payment_tests {
    use super::*;

    #[actix_rt::test]
    async fn test_payment_form_for_seeded_api() {
        let startup = startup();
        let session = admin_session(&startup).await;
        let app = init_app!(startup);

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/admin/payment_apis/test?id=1")
                .cookie(Cookie::new(session_cookie_name(), session))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let fields = &body["data"]["form"]["fields"];
        assert_eq!(fields[0]["name"], "ApiName");
        assert_eq!(fields[0]["value"], "Test Payment Api");
        assert_eq!(fields[1]["value"], 0.1);
    }

    #[actix_rt::test]
    async fn test_unknown_api_is_not_found() {
        let startup = startup();
        let session = admin_session(&startup).await;
        let app = init_app!(startup);

        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/admin/payment_apis/test?id=99")
                .cookie(Cookie::new(session_cookie_name(), session))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Payment api not exist");
    }

    #[actix_rt::test]
    async fn test_anonymous_visitor_is_unauthorized() {
        let startup = startup();
        let app = init_app!(startup);

        for uri in ["/admin/payment_apis/test?id=1", "/admin/payment_apis/test?id=99"] {
            let resp = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_rt::test]
    async fn test_submit_is_not_implemented() {
        let startup = startup();
        let session = admin_session(&startup).await;
        let app = init_app!(startup);

        let form = HashMap::from([
            (CSRF_TOKEN_FIELD, "t"),
            ("Amount", "1.5"),
            ("Currency", "CNY"),
            ("Description", "hello"),
        ]);
        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/admin/payment_apis/test?id=1")
                .cookie(Cookie::new(session_cookie_name(), session))
                .cookie(Cookie::new(CSRF_COOKIE_NAME, "t"))
                .set_form(&form)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }
}

// =============================================================================
// Health 端点测试
// =============================================================================

#[cfg(test)]
mod health_tests {
    use super::*;

    #[actix_rt::test]
    async fn test_health_check() {
        let startup = startup();
        let app = init_app!(startup);

        let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "healthy");

        let resp =
            test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
