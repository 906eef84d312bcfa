use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumMessage};

/// Cookie SameSite 策略
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr, EnumMessage,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum SameSitePolicy {
    #[strum(message = "Most secure, only same-site requests carry cookies")]
    Strict,
    #[default]
    #[strum(message = "Default, allows top-level navigation to carry cookies")]
    Lax,
    #[strum(message = "No restrictions, requires Secure attribute")]
    None,
}

impl std::fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "Invalid SameSite policy: '{}'. Valid: Strict, Lax, None",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - logging: 日志配置
/// - routes: 路由前缀
/// - session: 会话 cookie
/// - serial: 序列号生成
/// - forms: 表单（CSRF、验证码）
/// - currency: 货币列表和默认货币
/// - localization: 文本翻译表
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub localization: LocalizationConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：FS，分隔符：__
    /// 示例：FS__SERVER__PORT=9999
    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FS")
                    .separator("__")
                    .try_parsing(true),
            );

        // logging 尚未初始化，只能直接输出到 stderr
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" 或 "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 路由前缀配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_user_prefix")]
    pub user_prefix: String,
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
}

/// 会话 cookie 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub cookie_same_site: SameSitePolicy,
    #[serde(default)]
    pub cookie_domain: Option<String>,
    /// 非持久会话的有效期
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
    /// "记住登录" 会话的有效期
    #[serde(default = "default_remember_days")]
    pub remember_days: u64,
}

/// 序列号配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// chrono 格式串，默认 年月日
    #[serde(default = "default_serial_date_format")]
    pub date_format: String,
    #[serde(default = "default_serial_random_digits")]
    pub random_digits: usize,
}

/// 表单配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    #[serde(default = "default_enable_csrf")]
    pub enable_csrf: bool,
    #[serde(default = "default_captcha_length")]
    pub captcha_length: usize,
}

/// 货币配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// 货币代码 -> 显示名称
    #[serde(default = "default_currencies")]
    pub currencies: BTreeMap<String, String>,
}

/// 本地化配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalizationConfig {
    /// 原文 -> 译文，未命中时原样返回
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_user_prefix() -> String {
    "/user".to_string()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_session_cookie_name() -> String {
    "formsuite_session".to_string()
}

fn default_session_minutes() -> u64 {
    60
}

fn default_remember_days() -> u64 {
    30
}

fn default_serial_date_format() -> String {
    "%Y%m%d".to_string()
}

fn default_serial_random_digits() -> usize {
    8
}

fn default_enable_csrf() -> bool {
    true
}

fn default_captcha_length() -> usize {
    4
}

fn default_currency() -> String {
    "CNY".to_string()
}

fn default_currencies() -> BTreeMap<String, String> {
    [
        ("CNY", "Chinese Yuan"),
        ("USD", "US Dollar"),
        ("EUR", "Euro"),
        ("JPY", "Japanese Yen"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            user_prefix: default_user_prefix(),
            admin_prefix: default_admin_prefix(),
            health_prefix: default_health_prefix(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_session_cookie_name(),
            cookie_secure: false,
            cookie_same_site: SameSitePolicy::default(),
            cookie_domain: None,
            session_minutes: default_session_minutes(),
            remember_days: default_remember_days(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            date_format: default_serial_date_format(),
            random_digits: default_serial_random_digits(),
        }
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            enable_csrf: default_enable_csrf(),
            captcha_length: default_captcha_length(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            currencies: default_currencies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_from_str() {
        assert_eq!("strict".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Strict));
        assert_eq!("LAX".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Lax));
        assert!("sometimes".parse::<SameSitePolicy>().is_err());
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config should parse");
        assert_eq!(parsed.serial.random_digits, 8);
        assert_eq!(parsed.currency.default_currency, "CNY");
        assert!(parsed.forms.enable_csrf);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = StaticConfig::load_from("definitely-missing-formsuite.toml");
        assert_eq!(config.routes.user_prefix, "/user");
        assert_eq!(config.serial.date_format, "%Y%m%d");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = StaticConfig::default();
        config.server.port = 9123;
        config.save_to_file(&path).expect("save should succeed");

        let loaded = StaticConfig::load_from(path.to_str().expect("utf-8 path"));
        assert_eq!(loaded.server.port, 9123);
    }
}
