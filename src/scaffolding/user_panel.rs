use std::sync::Arc;

use serde::Serialize;

use super::menu_page::{GenericListForMenuPage, ListSource};
use crate::services::{UserTypes, UserTypesGroup};

/// 用户中心列表的默认模板
pub const USER_PANEL_LIST_TEMPLATE: &str = "common.user_panel/generic_list.html";

/// 用户中心的列表页面
///
/// 默认允许所有类型的已登录用户访问，不要求权限，使用用户中心的通用列表模板。
pub struct GenericListForUserPanel<S> {
    source: S,
    allowed_user_types: Vec<UserTypes>,
    required_privileges: Vec<String>,
    template_path: String,
}

impl<S: ListSource> GenericListForUserPanel<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            allowed_user_types: UserTypesGroup::ALL.to_vec(),
            required_privileges: Vec::new(),
            template_path: USER_PANEL_LIST_TEMPLATE.to_string(),
        }
    }

    pub fn with_allowed_user_types(mut self, user_types: &[UserTypes]) -> Self {
        self.allowed_user_types = user_types.to_vec();
        self
    }

    pub fn with_required_privileges<I, T>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.required_privileges = privileges.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_template_path(mut self, path: impl Into<String>) -> Self {
        self.template_path = path.into();
        self
    }
}

impl<S: ListSource> GenericListForMenuPage for GenericListForUserPanel<S> {
    type Source = S;

    fn source(&self) -> &S {
        &self.source
    }

    fn allowed_user_types(&self) -> &[UserTypes] {
        &self.allowed_user_types
    }

    fn required_privileges(&self) -> &[String] {
        &self.required_privileges
    }

    fn template_path(&self) -> &str {
        &self.template_path
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub url: String,
    pub icon_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuGroup {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// 向用户中心菜单添加菜单项
pub trait UserPanelMenuProvider: Send + Sync {
    /// 返回 (分组, 菜单项)
    fn menu_items(&self) -> Vec<(String, MenuItem)>;
}

impl<S: ListSource> UserPanelMenuProvider for GenericListForUserPanel<S> {
    fn menu_items(&self) -> Vec<(String, MenuItem)> {
        vec![(
            self.source.group().to_string(),
            MenuItem {
                name: self.source.name().to_string(),
                url: self.source.url().to_string(),
                icon_class: self.source.icon_class().to_string(),
            },
        )]
    }
}

/// 用户中心菜单
#[derive(Default, Clone)]
pub struct UserPanelMenu {
    providers: Vec<Arc<dyn UserPanelMenuProvider>>,
}

impl UserPanelMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn UserPanelMenuProvider>) {
        self.providers.push(provider);
    }

    /// 按分组汇总菜单项，分组按首次出现的顺序排列
    pub fn groups(&self) -> Vec<MenuGroup> {
        let mut groups: Vec<MenuGroup> = Vec::new();
        for (group, item) in self.providers.iter().flat_map(|p| p.menu_items()) {
            match groups.iter_mut().find(|g| g.name == group) {
                Some(existing) => existing.items.push(item),
                None => groups.push(MenuGroup {
                    name: group,
                    items: vec![item],
                }),
            }
        }
        groups
    }
}
