//! 请求上下文
//!
//! 每个请求构造一次，携带请求参数、会话信息以及表单需要调用的外部服务。

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;

use super::captcha::{CaptchaVerifier, MemoryCaptchaStore};
use super::currency::{CURRENCY_LIST_PROVIDER, CurrencyListItemProvider, CurrencySettings};
use super::list_items::ListItemProviders;
use super::localize::{TableTranslator, Translator};
use super::payment::{MemoryPaymentApiRepository, PaymentApiRepository};
use super::users::{MemoryUserManager, Session, User, UserManager};
use crate::config::StaticConfig;
use crate::serial::SerialGenerator;

/// 表单和页面依赖的外部服务
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserManager>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub payment_apis: Arc<dyn PaymentApiRepository>,
    pub translator: Arc<dyn Translator>,
    pub list_items: ListItemProviders,
    pub currency: CurrencySettings,
    pub serial: Arc<SerialGenerator>,
}

/// 进程内实现，具体类型保留下来供 HTTP 层和测试直接操作
pub struct MemoryServices {
    pub services: Arc<Services>,
    pub users: Arc<MemoryUserManager>,
    pub captcha: Arc<MemoryCaptchaStore>,
    pub payment_apis: Arc<MemoryPaymentApiRepository>,
}

impl MemoryServices {
    pub fn from_config(config: &StaticConfig) -> Self {
        let users = MemoryUserManager::arc(&config.session);
        let captcha = Arc::new(MemoryCaptchaStore::new(config.forms.captcha_length));
        let payment_apis = Arc::new(MemoryPaymentApiRepository::new());

        let mut list_items = ListItemProviders::new();
        list_items.register(
            CURRENCY_LIST_PROVIDER,
            Arc::new(CurrencyListItemProvider::from_config(&config.currency)),
        );

        let services = Services {
            users: users.clone(),
            captcha: captcha.clone(),
            payment_apis: payment_apis.clone(),
            translator: Arc::new(TableTranslator::from_config(&config.localization)),
            list_items,
            currency: CurrencySettings::from_config(&config.currency),
            serial: Arc::new(SerialGenerator::from_config(&config.serial)),
        };

        Self {
            services: Arc::new(services),
            users,
            captcha,
            payment_apis,
        }
    }
}

pub struct RequestContext {
    services: Arc<Services>,
    params: HashMap<String, String>,
    session_id: Option<String>,
    csrf_token: Option<String>,
    user: Option<User>,
    /// 处理过程中登录产生的会话，由 HTTP 层写入 cookie
    login: Mutex<Option<Session>>,
}

impl RequestContext {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            services,
            params: HashMap::new(),
            session_id: None,
            csrf_token: None,
            user: None,
            login: Mutex::new(None),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    pub fn with_user(mut self, user: Option<User>) -> Self {
        self.user = user;
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// 读取并转换请求参数，缺失或无法转换时返回 `None`
    pub fn param_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.param(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn translate(&self, text: &str) -> String {
        self.services.translator.translate(text)
    }

    pub fn set_login(&self, session: Session) {
        *self.login.lock() = Some(session);
    }

    pub fn take_login(&self) -> Option<Session> {
        self.login.lock().take()
    }
}
