use crate::directory::{Directory, DirectoryError};
use crate::models::ClientRecord;

/// 单次查找内的全量客户列表缓存
///
/// 只缓存成功的结果: 税号步骤拉取失败后，名称步骤会重新请求。
pub struct ClientListCache<'a, D: ?Sized> {
    directory: &'a D,
    clients: Option<Vec<ClientRecord>>,
}

impl<'a, D: Directory + ?Sized> ClientListCache<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            clients: None,
        }
    }

    pub async fn get(&mut self) -> Result<&[ClientRecord], DirectoryError> {
        if self.clients.is_none() {
            let fetched = self.directory.list_clients().await?;
            tracing::debug!("Fetched {} clients from directory", fetched.len());
            self.clients = Some(fetched);
        }
        Ok(self.clients.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::FakeDirectory;
    use serde_json::json;

    #[tokio::test]
    async fn full_list_is_fetched_once() {
        let directory = FakeDirectory::new().with_clients(vec![json!({ "id": 1 })]);
        let mut cache = ClientListCache::new(&directory);

        assert_eq!(cache.get().await.unwrap().len(), 1);
        assert_eq!(cache.get().await.unwrap().len(), 1);
        assert_eq!(directory.list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let directory = FakeDirectory::new().failing_list_once();
        let mut cache = ClientListCache::new(&directory);

        assert!(cache.get().await.is_err());
        assert!(cache.get().await.unwrap().is_empty());
        assert_eq!(directory.list_calls(), 2);
    }
}
