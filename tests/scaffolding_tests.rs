//! 列表脚手架集成测试
//!
//! 覆盖分页、关键字搜索和访问权限检查。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use formsuite::config::StaticConfig;
use formsuite::errors::{Result, SuiteError};
use formsuite::scaffolding::{
    GenericListForUserPanel, ListSource, MAX_PAGE_SIZE, handle_list_request,
};
use formsuite::services::{MemoryServices, RequestContext, User, UserTypes, UserTypesGroup};

// =============================================================================
// 测试数据
// =============================================================================

#[derive(Debug, Clone, Serialize)]
struct Order {
    serial: String,
}

/// 固定的 45 条订单
struct Orders;

#[async_trait]
impl ListSource for Orders {
    type Data = Order;

    fn name(&self) -> &str {
        "My Orders"
    }

    fn url(&self) -> &str {
        "/user/orders"
    }

    async fn query(&self, _ctx: &RequestContext, keyword: Option<&str>) -> Result<Vec<Order>> {
        Ok((1..=45)
            .map(|i| Order {
                serial: format!("ORD{:03}", i),
            })
            .filter(|o| keyword.is_none_or(|k| o.serial.contains(k)))
            .collect())
    }
}

fn user(user_type: UserTypes, privileges: &[&str]) -> User {
    User {
        id: Uuid::new_v4(),
        username: "tester".into(),
        password_hash: String::new(),
        user_type,
        privileges: privileges.iter().map(|p| p.to_string()).collect(),
        created_at: Utc::now(),
    }
}

fn context(user: Option<User>) -> RequestContext {
    let services = MemoryServices::from_config(&StaticConfig::default());
    RequestContext::new(Arc::clone(&services.services)).with_user(user)
}

// =============================================================================
// 分页和搜索
// =============================================================================

#[cfg(test)]
mod pagination_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_page() {
        let page = GenericListForUserPanel::new(Orders);
        let resp = handle_list_request(&page, &context(Some(user(UserTypes::User, &[]))))
            .await
            .unwrap();

        assert_eq!(resp.title, "My Orders");
        assert_eq!(resp.rows.len(), 20);
        assert_eq!(resp.rows[0].serial, "ORD001");
        assert_eq!(resp.pagination.total, 45);
        assert_eq!(resp.pagination.total_pages, 3);
    }

    #[tokio::test]
    async fn test_last_page_and_keyword() {
        let page = GenericListForUserPanel::new(Orders);
        let ctx = context(Some(user(UserTypes::User, &[])))
            .with_param("page", "3")
            .with_param("page_size", "20");
        let resp = handle_list_request(&page, &ctx).await.unwrap();
        assert_eq!(resp.rows.len(), 5);
        assert_eq!(resp.rows[0].serial, "ORD041");

        let ctx = context(Some(user(UserTypes::User, &[]))).with_param("keyword", "ORD01");
        let resp = handle_list_request(&page, &ctx).await.unwrap();
        assert_eq!(resp.keyword.as_deref(), Some("ORD01"));
        assert_eq!(resp.pagination.total, 10);
        assert_eq!(resp.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_page_beyond_end_is_empty() {
        let page = GenericListForUserPanel::new(Orders);
        let ctx = context(Some(user(UserTypes::User, &[])))
            .with_param("page", "9")
            .with_param("page_size", "500");
        let resp = handle_list_request(&page, &ctx).await.unwrap();
        assert!(resp.rows.is_empty());
        assert_eq!(resp.pagination.page_size, MAX_PAGE_SIZE);
        assert_eq!(resp.pagination.total_pages, 1);
    }
}

// =============================================================================
// 权限检查
// =============================================================================

#[cfg(test)]
mod privilege_tests {
    use super::*;

    #[tokio::test]
    async fn test_every_user_type_allowed_by_default() {
        let page = GenericListForUserPanel::new(Orders);
        for user_type in UserTypesGroup::ALL {
            let ctx = context(Some(user(*user_type, &[])));
            assert!(handle_list_request(&page, &ctx).await.is_ok());
        }

        let err = handle_list_request(&page, &context(None)).await.unwrap_err();
        assert!(matches!(err, SuiteError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_restricted_page() {
        let page = GenericListForUserPanel::new(Orders)
            .with_allowed_user_types(UserTypesGroup::ADMIN)
            .with_required_privileges(["orders:view"]);

        let err = handle_list_request(&page, &context(Some(user(UserTypes::User, &["orders:view"]))))
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::Forbidden(_)));

        let err = handle_list_request(&page, &context(Some(user(UserTypes::Admin, &[]))))
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::Forbidden(_)));

        let ctx = context(Some(user(UserTypes::Admin, &["orders:view"])));
        assert!(handle_list_request(&page, &ctx).await.is_ok());
    }
}
