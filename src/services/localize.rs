//! 文本翻译
//!
//! 本地化管线由宿主提供，这里只定义翻译接口和基于配置表的实现。

use std::collections::BTreeMap;

use crate::config::LocalizationConfig;

pub trait Translator: Send + Sync {
    /// 未找到译文时返回原文
    fn translate(&self, text: &str) -> String;
}

/// 原样返回
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// 从 `[localization.translations]` 读取的翻译表
#[derive(Debug, Clone, Default)]
pub struct TableTranslator {
    table: BTreeMap<String, String>,
}

impl TableTranslator {
    pub fn new(table: BTreeMap<String, String>) -> Self {
        Self { table }
    }

    pub fn from_config(config: &LocalizationConfig) -> Self {
        Self::new(config.translations.clone())
    }
}

impl Translator for TableTranslator {
    fn translate(&self, text: &str) -> String {
        self.table
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
