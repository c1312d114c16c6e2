use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 发票目录服务 (Xubio) 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            directory: DirectoryConfig {
                base_url: "https://xubio.com/API/1.1".to_string(),
                timeout_secs: 30,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// 默认值可被 `APP__SERVER__PORT`、`APP__DIRECTORY__BASE_URL` 等变量覆盖。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("APP").separator("__"))
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port)?
            .set_default("directory.base_url", defaults.directory.base_url)?
            .set_default("directory.timeout_secs", defaults.directory.timeout_secs)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
