//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::routes::configure_app;
use crate::config::get_config;
use crate::runtime::lifetime;

/// 过期验证码的清理间隔
const CAPTCHA_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();
    let startup = lifetime::startup::prepare_server_startup(&config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let captcha = startup.captcha.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CAPTCHA_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            captcha.purge_expired();
        }
    });

    let routes = config.routes.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .configure(|cfg| configure_app(cfg, &startup, &routes))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
