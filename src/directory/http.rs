use crate::config::DirectoryConfig;
use reqwest::Client;
use std::time::Duration;

/// 创建共享的 HTTP 客户端
pub fn create_http_client(config: &DirectoryConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}
