//! 支付接口仓储
//!
//! 持久化由宿主的仓储层负责，这里只读取支付接口记录。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;

use crate::errors::Result;

#[derive(Debug, Clone, Serialize)]
pub struct PaymentApi {
    pub id: i64,
    pub name: String,
    /// 接口类型，例如 "TestApi"、"Alipay"
    pub api_type: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentApiRepository: Send + Sync {
    async fn get_by_id(&self, id: i64) -> Result<Option<PaymentApi>>;
}

/// 进程内的支付接口存储
#[derive(Default)]
pub struct MemoryPaymentApiRepository {
    apis: DashMap<i64, PaymentApi>,
    next_id: AtomicI64,
}

impl MemoryPaymentApiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: impl Into<String>, api_type: impl Into<String>) -> PaymentApi {
        let api = PaymentApi {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            name: name.into(),
            api_type: api_type.into(),
            created_at: Utc::now(),
        };
        self.apis.insert(api.id, api.clone());
        info!("Added payment api #{} '{}'", api.id, api.name);
        api
    }
}

#[async_trait]
impl PaymentApiRepository for MemoryPaymentApiRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<PaymentApi>> {
        Ok(self.apis.get(&id).map(|api| api.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_start_from_one() {
        let repo = MemoryPaymentApiRepository::new();
        let first = repo.add("Test", "TestApi");
        let second = repo.add("Other", "TestApi");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_id(2).await.unwrap().unwrap().name, "Other");
        assert!(repo.get_by_id(3).await.unwrap().is_none());
    }

    #[test]
    fn test_lookup_from_sync_code() {
        let repo = MemoryPaymentApiRepository::new();
        repo.add("Test", "TestApi");
        let found = tokio_test::block_on(repo.get_by_id(1)).unwrap();
        assert_eq!(found.map(|api| api.api_type), Some("TestApi".to_string()));
    }
}
