use thiserror::Error;

/// 目录服务调用错误
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}
