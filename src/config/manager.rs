use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::{ValidationError, Validator};

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();

/// 配置載入錯誤
#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error("無法讀取配置: {0}")]
    Source(#[from] config::ConfigError),

    #[error("配置驗證失敗: {0}")]
    Invalid(#[from] ValidationError),
}

/// 初始化配置（在應用程序啟動時調用）
pub fn init_config() -> Result<&'static ApplicationConfig, ConfigLoadError> {
    if let Some(existing) = CONFIG.get() {
        warn!("配置已經被初始化，跳過重複初始化");
        return Ok(existing);
    }

    let app_config = ApplicationConfig::load_from_env()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigLoadError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    pub fn load(env: Environment) -> Result<Self, ConfigLoadError> {
        let config_source = ConfigLoader::load(env)?;
        Self::from_source(config_source)
    }

    /// 反序列化並驗證
    pub fn from_source(source: config::Config) -> Result<Self, ConfigLoadError> {
        let app_config: ApplicationConfig = source.try_deserialize()?;
        app_config.validate()?;
        debug!("配置驗證通過");
        Ok(app_config)
    }
}
