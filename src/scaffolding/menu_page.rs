use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{Result, SuiteError};
use crate::services::{RequestContext, User, UserTypes};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// 列表页面的数据来源
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Data: Serialize + Send;

    /// 页面名称，同时作为标题和菜单文本
    fn name(&self) -> &str;

    /// 页面地址
    fn url(&self) -> &str;

    /// 所在的菜单分组
    fn group(&self) -> &str {
        "Other"
    }

    fn icon_class(&self) -> &str {
        "fa fa-list"
    }

    /// 查询全部匹配关键字的数据，分页由调用方处理
    async fn query(&self, ctx: &RequestContext, keyword: Option<&str>) -> Result<Vec<Self::Data>>;
}

/// 菜单中的列表页面
pub trait GenericListForMenuPage: Send + Sync + 'static {
    type Source: ListSource;

    fn source(&self) -> &Self::Source;

    /// 允许访问的用户类型
    fn allowed_user_types(&self) -> &[UserTypes];

    /// 访问需要的权限
    fn required_privileges(&self) -> &[String];

    /// 渲染列表使用的模板
    fn template_path(&self) -> &str;
}

/// 列表请求参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    pub keyword: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            keyword: None,
        }
    }
}

impl ListQuery {
    /// 从请求参数读取，页码至少为 1，每页数量限制在 1..=100
    pub fn from_context(ctx: &RequestContext) -> Self {
        Self {
            page: ctx.param_as::<usize>("page").unwrap_or(1).max(1),
            page_size: ctx
                .param_as::<usize>("page_size")
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            keyword: ctx
                .param("keyword")
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPageResponse<T> {
    pub title: String,
    pub template_path: String,
    pub keyword: Option<String>,
    pub rows: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 检查当前用户能否访问页面
///
/// 未登录返回 `Unauthorized`，用户类型或权限不满足返回 `Forbidden`。
pub fn check_privileges(
    user: Option<&User>,
    allowed_user_types: &[UserTypes],
    required_privileges: &[String],
) -> Result<()> {
    let Some(user) = user else {
        return Err(SuiteError::unauthorized("Action require user logged in"));
    };

    if !allowed_user_types.contains(&user.user_type) {
        let allowed: Vec<&str> = allowed_user_types.iter().map(|t| t.as_ref()).collect();
        warn!(
            "User '{}' of type {:?} denied, requires one of [{}]",
            user.username,
            user.user_type,
            allowed.join(", ")
        );
        return Err(SuiteError::forbidden(format!(
            "Action require user type in [{}]",
            allowed.join(", ")
        )));
    }

    if let Some(missing) = required_privileges
        .iter()
        .find(|privilege| !user.has_privilege(privilege))
    {
        warn!("User '{}' lacks privilege '{}'", user.username, missing);
        return Err(SuiteError::forbidden(format!(
            "Action require privilege '{}'",
            missing
        )));
    }

    Ok(())
}

/// 处理列表页面请求：检查权限、查询、分页
pub async fn handle_list_request<P: GenericListForMenuPage>(
    page: &P,
    ctx: &RequestContext,
) -> Result<ListPageResponse<<P::Source as ListSource>::Data>> {
    check_privileges(
        ctx.user(),
        page.allowed_user_types(),
        page.required_privileges(),
    )?;

    let query = ListQuery::from_context(ctx);
    let source = page.source();
    let rows = source.query(ctx, query.keyword.as_deref()).await?;

    let total = rows.len();
    let total_pages = total.div_ceil(query.page_size);
    let rows: Vec<_> = rows
        .into_iter()
        .skip((query.page - 1) * query.page_size)
        .take(query.page_size)
        .collect();

    debug!(
        "List '{}': returning {} rows (page {} of {}, total: {})",
        source.name(),
        rows.len(),
        query.page,
        total_pages,
        total
    );

    Ok(ListPageResponse {
        title: ctx.translate(source.name()),
        template_path: page.template_path().to_string(),
        keyword: query.keyword,
        rows,
        pagination: PaginationInfo {
            page: query.page,
            page_size: query.page_size,
            total,
            total_pages,
        },
    })
}
