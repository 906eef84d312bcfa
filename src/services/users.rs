//! 用户和会话
//!
//! `UserManager` 是宿主用户系统的窄接口；`MemoryUserManager` 是进程内实现。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use strum::{AsRefStr, EnumIter};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::errors::{Result, SuiteError};
use crate::utils::password::{hash_password, verify_password};

/// 用户类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr)]
pub enum UserTypes {
    User,
    Admin,
    SuperAdmin,
    CooperationPartner,
}

/// 常用的用户类型组合
pub struct UserTypesGroup;

impl UserTypesGroup {
    pub const ALL: &'static [UserTypes] = &[
        UserTypes::User,
        UserTypes::Admin,
        UserTypes::SuperAdmin,
        UserTypes::CooperationPartner,
    ];
    pub const ADMIN: &'static [UserTypes] = &[UserTypes::Admin, UserTypes::SuperAdmin];
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_type: UserTypes,
    pub privileges: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 超级管理员拥有全部权限
    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.user_type == UserTypes::SuperAdmin || self.privileges.iter().any(|p| p == privilege)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// 是否为 "记住登录" 的持久会话
    pub remember: bool,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[async_trait]
pub trait UserManager: Send + Sync {
    /// 注册用户，用户名已存在时返回 `Conflict`
    async fn register(&self, username: &str, password: &str) -> Result<User>;

    /// 登录，成功时返回新会话
    async fn login(&self, username: &str, password: &str, remember: bool) -> Result<Session>;

    /// 根据会话获取用户，会话不存在或过期时返回 `None`
    async fn session_user(&self, session_id: &str) -> Option<User>;

    /// 用户当前有效的会话，按创建时间倒序
    async fn sessions_of(&self, user_id: Uuid) -> Vec<Session>;
}

/// 进程内用户存储
pub struct MemoryUserManager {
    /// 小写用户名 -> 用户
    users: DashMap<String, User>,
    sessions: DashMap<String, Session>,
    session_ttl: Duration,
    remember_ttl: Duration,
}

impl MemoryUserManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            users: DashMap::new(),
            sessions: DashMap::new(),
            session_ttl: Duration::minutes(config.session_minutes as i64),
            remember_ttl: Duration::days(config.remember_days as i64),
        }
    }

    pub fn arc(config: &SessionConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// 修改用户类型和权限，用户不存在时返回 `NotFound`
    pub fn set_role(&self, username: &str, user_type: UserTypes, privileges: Vec<String>) -> Result<()> {
        let mut user = self
            .users
            .get_mut(&username.trim().to_lowercase())
            .ok_or_else(|| SuiteError::not_found(format!("User '{}' not found", username)))?;
        user.user_type = user_type;
        user.privileges = privileges;
        Ok(())
    }

    fn find_by_id(&self, user_id: Uuid) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.id == user_id)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserManager for MemoryUserManager {
    async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SuiteError::bad_request("Username can't be empty"));
        }

        let key = username.to_lowercase();
        if self.users.contains_key(&key) {
            return Err(SuiteError::conflict("Username is already taken, please choose other username"));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            user_type: UserTypes::User,
            privileges: Vec::new(),
            created_at: Utc::now(),
        };

        // 两次请求同时注册同一个用户名时只保留第一个
        match self.users.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(SuiteError::conflict(
                "Username is already taken, please choose other username",
            )),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(user.clone());
                info!("Registered user '{}'", user.username);
                Ok(user)
            }
        }
    }

    async fn login(&self, username: &str, password: &str, remember: bool) -> Result<Session> {
        let user = self
            .users
            .get(&username.trim().to_lowercase())
            .map(|entry| entry.value().clone());

        let user = match user {
            Some(user) if verify_password(password, &user.password_hash)? => user,
            _ => {
                warn!("Login failed for '{}'", username);
                return Err(SuiteError::unauthorized("Incorrect username or password"));
            }
        };

        let now = Utc::now();
        let ttl = if remember {
            self.remember_ttl
        } else {
            self.session_ttl
        };
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id: user.id,
            username: user.username.clone(),
            created_at: now,
            expires_at: now + ttl,
            remember,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        info!("User '{}' logged in", user.username);
        Ok(session)
    }

    async fn session_user(&self, session_id: &str) -> Option<User> {
        let session = self.sessions.get(session_id).map(|s| s.value().clone())?;
        if session.is_expired(Utc::now()) {
            self.sessions.remove(session_id);
            return None;
        }
        self.find_by_id(session.user_id)
    }

    async fn sessions_of(&self, user_id: Uuid) -> Vec<Session> {
        let now = Utc::now();
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && !s.is_expired(now))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions
    }
}
