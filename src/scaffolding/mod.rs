//! 菜单页面列表脚手架
//!
//! `GenericListForMenuPage` 描述一个出现在菜单中的列表页面，
//! `GenericListForUserPanel` 在它之上提供用户中心的默认设置。

mod menu_page;
mod user_panel;

pub use menu_page::{
    DEFAULT_PAGE_SIZE, GenericListForMenuPage, ListPageResponse, ListQuery, ListSource,
    MAX_PAGE_SIZE, PaginationInfo, check_privileges, handle_list_request,
};
pub use user_panel::{
    GenericListForUserPanel, MenuGroup, MenuItem, USER_PANEL_LIST_TEMPLATE, UserPanelMenu,
    UserPanelMenuProvider,
};
