//! 用户中心列表页面和菜单

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::api::context::HttpContext;
use crate::api::helpers::{api_result, error_from_suite, success_response};
use crate::errors::SuiteError;
use crate::scaffolding::{GenericListForMenuPage, UserPanelMenu, handle_list_request};
use crate::services::Services;

pub async fn list_page<P: GenericListForMenuPage>(
    req: HttpRequest,
    services: web::Data<Arc<Services>>,
    page: web::Data<P>,
) -> HttpResponse {
    let http = HttpContext::from_request(&req, services.get_ref(), false).await;
    let response = api_result(handle_list_request(page.get_ref(), &http.ctx).await);
    http.finish(response)
}

/// 当前用户可见的菜单
pub async fn user_menu(
    req: HttpRequest,
    services: web::Data<Arc<Services>>,
    menu: web::Data<UserPanelMenu>,
) -> HttpResponse {
    let http = HttpContext::from_request(&req, services.get_ref(), false).await;
    let response = if http.ctx.user().is_some() {
        success_response(menu.groups())
    } else {
        error_from_suite(&SuiteError::unauthorized("Action require user logged in"))
    };
    http.finish(response)
}
