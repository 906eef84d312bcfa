use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when nothing was initialized, so
/// library users and unit tests don't have to call `init_config()` first.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration from "config.toml"
///
/// # Examples
/// ```no_run
/// use formsuite::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(DEFAULT_CONFIG_PATH);
}

/// Initialize the global configuration from the given TOML path
///
/// If the configuration was already read (or defaulted), the new file
/// replaces it.
pub fn init_config_from(path: &str) {
    set_config(StaticConfig::load_from(path));
}

/// Replace the global configuration
pub fn set_config(config: StaticConfig) {
    let config = Arc::new(config);
    CONFIG
        .get_or_init(|| ArcSwap::new(config.clone()))
        .store(config);
}
