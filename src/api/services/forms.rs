//! 表单页面
//!
//! GET 绑定表单并返回模板数据和 HTML，POST 提交表单并返回处理结果。

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use tracing::{debug, info};

use crate::api::context::HttpContext;
use crate::api::helpers::{error_from_suite, success_response};
use crate::forms::{FormHandler, ModelFormBuilder};
use crate::services::Services;

pub async fn get_form<M>(req: HttpRequest, services: web::Data<Arc<Services>>) -> HttpResponse
where
    M: FormHandler + Default,
{
    let http = HttpContext::from_request(&req, services.get_ref(), true).await;

    let mut builder = ModelFormBuilder::new(M::default());
    let response = match builder.bind(&http.ctx).await {
        Ok(()) => {
            debug!("Rendering form '{}'", builder.form_attribute().name);
            success_response(json!({
                "form": builder.to_template_value(),
                "html": builder.to_string(),
            }))
        }
        Err(e) => {
            info!("Binding form '{}' failed: {}", builder.form_attribute().name, e);
            error_from_suite(&e)
        }
    };
    http.finish(response)
}

pub async fn post_form<M>(
    req: HttpRequest,
    services: web::Data<Arc<Services>>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse
where
    M: FormHandler + Default,
{
    let http = HttpContext::from_request(&req, services.get_ref(), false).await;

    let mut builder = ModelFormBuilder::new(M::default());
    let response = match builder.submit(&http.ctx, &form.into_inner()).await {
        Ok(result) => success_response(result),
        Err(e) => {
            info!("Submitting form '{}' failed: {}", builder.form_attribute().name, e);
            error_from_suite(&e)
        }
    };
    http.finish(response)
}
