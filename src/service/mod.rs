pub mod cache;
pub mod cascade;
pub mod matcher;
pub mod normalize;
pub mod numbering;
pub mod resolver;
pub mod retry;

#[cfg(test)]
mod test_support;

pub use matcher::{MatchMode, NameQuery, NameRule};
pub use normalize::{digits_only, normalize_name};
pub use numbering::{format_document_number, tipo_comprobante, InvoiceNumbering};
pub use resolver::resolve_client;
pub use retry::retry_lookup;

use crate::directory::DirectoryClient;
use crate::models::{CustomerRecord, LookupResult, RetryOutcome};
use reqwest::Client;
use serde_json::Value;

/// 查找服务: 持有共享 HTTP 客户端，按请求携带的 token 访问目录服务
pub struct LookupService {
    http: Client,
    base_url: String,
}

impl LookupService {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn directory(&self, access_token: &str) -> DirectoryClient {
        DirectoryClient::new(self.http.clone(), self.base_url.clone(), access_token)
    }

    pub async fn lookup_client(&self, record: &CustomerRecord, access_token: &str) -> LookupResult {
        resolve_client(&self.directory(access_token), record, access_token).await
    }

    /// token 取自 `lookupData.access_token`，缺失时按空 token 访问，失败记录在追踪中
    pub async fn retry_lookup(&self, lookup_data: Value) -> RetryOutcome {
        let access_token = lookup_data
            .get("access_token")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let directory = self.directory(access_token);
        retry_lookup(&directory, lookup_data).await
    }
}
