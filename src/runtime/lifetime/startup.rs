use std::sync::Arc;

use tracing::{debug, info};

use crate::api::services::AppStartTime;
use crate::config::StaticConfig;
use crate::plugins::{UserSessionsList, user_sessions_list};
use crate::scaffolding::UserPanelMenu;
use crate::services::{
    MemoryCaptchaStore, MemoryPaymentApiRepository, MemoryServices, MemoryUserManager, Services,
};

/// 测试支付接口的默认名称
const DEMO_PAYMENT_API_NAME: &str = "Test Payment Api";
const DEMO_PAYMENT_API_TYPE: &str = "TestApi";

/// 服务器运行需要的共享对象
#[derive(Clone)]
pub struct StartupContext {
    pub services: Arc<Services>,
    pub users: Arc<MemoryUserManager>,
    pub captcha: Arc<MemoryCaptchaStore>,
    pub payment_apis: Arc<MemoryPaymentApiRepository>,
    pub sessions_list: Arc<UserSessionsList>,
    pub menu: UserPanelMenu,
    pub start_time: AppStartTime,
}

/// 准备服务器启动的上下文
///
/// 构建进程内服务、用户中心页面和菜单，并登记一个用于测试的支付接口。
pub fn prepare_server_startup(config: &StaticConfig) -> StartupContext {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let MemoryServices {
        services,
        users,
        captcha,
        payment_apis,
    } = MemoryServices::from_config(config);

    let demo = payment_apis.add(DEMO_PAYMENT_API_NAME, DEMO_PAYMENT_API_TYPE);
    info!(
        "Payment api '{}' available for testing with id {}",
        demo.name, demo.id
    );

    let sessions_list = Arc::new(user_sessions_list(&config.routes.user_prefix));
    let mut menu = UserPanelMenu::new();
    menu.register(sessions_list.clone());

    debug!(
        "Pre-startup processing completed in {:?}",
        start_time.elapsed()
    );

    StartupContext {
        services,
        users,
        captcha,
        payment_apis,
        sessions_list,
        menu,
        start_time: AppStartTime {
            start_datetime: chrono::Utc::now(),
        },
    }
}
