//! 验证码图片

use std::fmt::Write;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::api::context::HttpContext;
use crate::services::{MemoryCaptchaStore, Services};
use crate::utils::escape_html;

const CHAR_WIDTH: usize = 24;
const HEIGHT: usize = 40;

/// 为当前会话生成验证码，返回 SVG 图片
pub async fn captcha_image(
    req: HttpRequest,
    path: web::Path<String>,
    services: web::Data<Arc<Services>>,
    store: web::Data<Arc<MemoryCaptchaStore>>,
) -> HttpResponse {
    let http = HttpContext::from_request(&req, services.get_ref(), false).await;
    let key = path.into_inner();

    let code = match http.ctx.session_id() {
        Some(session_id) => store.issue(session_id, &key),
        None => String::new(),
    };
    debug!("Rendering captcha for key '{}'", key);

    let response = HttpResponse::Ok()
        .content_type("image/svg+xml")
        .insert_header(("Cache-Control", "no-store"))
        .body(render_svg(&code));
    http.finish(response)
}

fn render_svg(code: &str) -> String {
    let width = CHAR_WIDTH * (code.chars().count() + 1);
    let height = HEIGHT;
    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><rect width="100%" height="100%" fill="#f5f5f5"/>"##
    );
    for (i, c) in code.chars().enumerate() {
        let x = CHAR_WIDTH / 2 + i * CHAR_WIDTH;
        let y = 26 + rand::random_range(0..8);
        let rotate = rand::random_range(-25i32..=25);
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" font-size="22" font-family="monospace" transform="rotate({rotate} {x} {y})">{}</text>"#,
            escape_html(&c.to_string())
        );
    }
    svg.push_str("</svg>");
    svg
}
