use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

/// 下拉列表的一个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub name: String,
    pub value: String,
}

impl ListItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 列表项提供器
pub trait ListItemProvider: Send + Sync {
    fn items(&self) -> Vec<ListItem>;
}

/// 按名称登记的列表项提供器
#[derive(Clone, Default)]
pub struct ListItemProviders {
    providers: HashMap<String, Arc<dyn ListItemProvider>>,
}

impl ListItemProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn ListItemProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// 未登记的名称返回 `None`
    pub fn items(&self, name: &str) -> Option<Vec<ListItem>> {
        self.providers.get(name).map(|p| p.items())
    }
}

impl std::fmt::Debug for ListItemProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListItemProviders")
            .field("names", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
