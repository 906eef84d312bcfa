//! 序列号生成器
//!
//! 默认序列号是 年月日 + 8 位随机数字，共 16 位。
//! 登记的回调可以按顺序改写生成结果。

use std::any::Any;
use std::fmt::Write;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{trace, warn};

use crate::config::SerialConfig;
use crate::utils::{DIGITS, random_string};

/// 序列号生成回调
pub trait SerialGenerateCallback: Send + Sync {
    /// `data` 是要生成序列号的数据，回调可以直接修改 `serial`
    fn on_generate(&self, data: &dyn Any, serial: &mut String);
}

pub struct SerialGenerator {
    date_format: String,
    random_digits: usize,
    callbacks: Vec<Arc<dyn SerialGenerateCallback>>,
}

impl SerialGenerator {
    pub fn new(date_format: impl Into<String>, random_digits: usize) -> Self {
        Self {
            date_format: date_format.into(),
            random_digits,
            callbacks: Vec::new(),
        }
    }

    pub fn from_config(config: &SerialConfig) -> Self {
        Self::new(config.date_format.clone(), config.random_digits)
    }

    /// 登记回调，按登记顺序调用
    pub fn register(&mut self, callback: Arc<dyn SerialGenerateCallback>) {
        self.callbacks.push(callback);
    }

    pub fn with_callback(mut self, callback: Arc<dyn SerialGenerateCallback>) -> Self {
        self.register(callback);
        self
    }

    /// 给指定的数据生成序列号
    pub fn generate_for(&self, data: &dyn Any) -> String {
        self.generate_at(Local::now(), data)
    }

    pub fn generate_at(&self, now: DateTime<Local>, data: &dyn Any) -> String {
        let mut serial = String::new();
        if write!(serial, "{}", now.format(&self.date_format)).is_err() {
            warn!("Invalid serial date format '{}', using %Y%m%d", self.date_format);
            serial = now.format("%Y%m%d").to_string();
        }
        serial.push_str(&random_string(self.random_digits, DIGITS));
        for callback in &self.callbacks {
            callback.on_generate(data, &mut serial);
        }
        trace!("Generated serial {}", serial);
        serial
    }
}

impl Default for SerialGenerator {
    fn default() -> Self {
        Self::from_config(&SerialConfig::default())
    }
}
