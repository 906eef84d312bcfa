//! 用户中心: 登录会话列表

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{Result, SuiteError};
use crate::scaffolding::{GenericListForUserPanel, ListSource};
use crate::services::RequestContext;

/// 会话 id 只显示前几位
const VISIBLE_ID_CHARS: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct SessionRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub remember: bool,
    /// 是否为发起请求的会话
    pub current: bool,
}

/// 当前用户的登录会话
pub struct UserSessionsSource {
    url: String,
}

impl UserSessionsSource {
    pub fn new(user_prefix: &str) -> Self {
        Self {
            url: format!("{}/sessions", user_prefix.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ListSource for UserSessionsSource {
    type Data = SessionRow;

    fn name(&self) -> &str {
        "Login Sessions"
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn group(&self) -> &str {
        "Account Manage"
    }

    fn icon_class(&self) -> &str {
        "fa fa-key"
    }

    async fn query(&self, ctx: &RequestContext, keyword: Option<&str>) -> Result<Vec<SessionRow>> {
        let user = ctx
            .user()
            .ok_or_else(|| SuiteError::unauthorized("Action require user logged in"))?;

        let sessions = ctx.services().users.sessions_of(user.id).await;
        Ok(sessions
            .into_iter()
            .filter(|s| keyword.is_none_or(|k| s.id.starts_with(k)))
            .map(|s| SessionRow {
                current: ctx.session_id() == Some(s.id.as_str()),
                id: s.id.chars().take(VISIBLE_ID_CHARS).collect(),
                created_at: s.created_at,
                expires_at: s.expires_at,
                remember: s.remember,
            })
            .collect())
    }
}

pub type UserSessionsList = GenericListForUserPanel<UserSessionsSource>;

pub fn user_sessions_list(user_prefix: &str) -> UserSessionsList {
    GenericListForUserPanel::new(UserSessionsSource::new(user_prefix))
}
