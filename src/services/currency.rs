//! 货币设置和货币列表

use super::list_items::{ListItem, ListItemProvider};
use crate::config::CurrencyConfig;

/// 货币列表提供器的登记名称
pub const CURRENCY_LIST_PROVIDER: &str = "currency";

#[derive(Debug, Clone)]
pub struct CurrencySettings {
    pub default_currency: String,
}

impl CurrencySettings {
    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self {
            default_currency: config.default_currency.clone(),
        }
    }
}

/// 按货币代码排序的货币列表
#[derive(Debug, Clone)]
pub struct CurrencyListItemProvider {
    items: Vec<ListItem>,
}

impl CurrencyListItemProvider {
    pub fn from_config(config: &CurrencyConfig) -> Self {
        Self {
            items: config
                .currencies
                .iter()
                .map(|(code, name)| ListItem::new(name, code))
                .collect(),
        }
    }
}

impl ListItemProvider for CurrencyListItemProvider {
    fn items(&self) -> Vec<ListItem> {
        self.items.clone()
    }
}
