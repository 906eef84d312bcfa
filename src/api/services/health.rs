use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::api::helpers::success_response;
use crate::api::types::HealthResponse;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(app_start_time: web::Data<AppStartTime>) -> impl Responder {
        trace!("Received health check request");
        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u32;

        success_response(HealthResponse {
            status: "healthy".to_string(),
            timestamp: now.to_rfc3339(),
            uptime,
        })
    }

    pub async fn liveness_check() -> impl Responder {
        HttpResponse::NoContent().finish()
    }
}

/// 健康检查路由
pub fn health_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
