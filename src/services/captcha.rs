//! 验证码
//!
//! 验证码图片的生成不在这里处理，存储只关心 (会话, 验证码键) -> 验证码。

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::utils::random_string;

/// 去掉了容易混淆的 0/O、1/I
const CAPTCHA_CHARS: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// 验证码有效期
const CAPTCHA_TTL: Duration = Duration::from_secs(600);

pub trait CaptchaVerifier: Send + Sync {
    /// 校验输入，每个验证码只能校验一次
    fn verify(&self, session_id: Option<&str>, key: &str, input: &str) -> bool;
}

/// 进程内的验证码存储
pub struct MemoryCaptchaStore {
    codes: DashMap<(String, String), (String, Instant)>,
    length: usize,
}

impl MemoryCaptchaStore {
    pub fn new(length: usize) -> Self {
        Self {
            codes: DashMap::new(),
            length: length.max(1),
        }
    }

    /// 为会话生成新的验证码，覆盖同一个键下的旧验证码
    pub fn issue(&self, session_id: &str, key: &str) -> String {
        let code = random_string(self.length, CAPTCHA_CHARS);
        self.codes.insert(
            (session_id.to_string(), key.to_string()),
            (code.clone(), Instant::now()),
        );
        debug!("Issued captcha for key '{}'", key);
        code
    }

    /// 清理过期验证码
    pub fn purge_expired(&self) {
        self.codes
            .retain(|_, (_, issued)| issued.elapsed() < CAPTCHA_TTL);
    }
}

impl CaptchaVerifier for MemoryCaptchaStore {
    fn verify(&self, session_id: Option<&str>, key: &str, input: &str) -> bool {
        let Some(session_id) = session_id else {
            return false;
        };
        match self.codes.remove(&(session_id.to_string(), key.to_string())) {
            Some((_, (code, issued))) => {
                issued.elapsed() < CAPTCHA_TTL && code.eq_ignore_ascii_case(input.trim())
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captcha_verifies_once() {
        let store = MemoryCaptchaStore::new(4);
        let code = store.issue("s1", "Common.Admin.UserReg");
        assert_eq!(code.len(), 4);

        assert!(store.verify(Some("s1"), "Common.Admin.UserReg", &code.to_lowercase()));
        assert!(!store.verify(Some("s1"), "Common.Admin.UserReg", &code));
    }

    #[test]
    fn test_wrong_input_consumes_captcha() {
        let store = MemoryCaptchaStore::new(4);
        let code = store.issue("s1", "k");

        assert!(!store.verify(Some("s1"), "k", "nope"));
        assert!(!store.verify(Some("s1"), "k", &code));
    }

    #[test]
    fn test_captcha_is_scoped_to_session_and_key() {
        let store = MemoryCaptchaStore::new(4);
        let code = store.issue("s1", "k");

        assert!(!store.verify(None, "k", &code));
        assert!(!store.verify(Some("s2"), "k", &code));
        assert!(!store.verify(Some("s1"), "other", &code));
        assert!(store.verify(Some("s1"), "k", &code));
    }
}
