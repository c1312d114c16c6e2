use super::{Directory, DirectoryError};
use crate::models::{ClientRecord, LedgerEntry, PointOfSale};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// 发票目录服务 (Xubio REST API) 客户端
///
/// 每次流水线调用使用调用方提供的 access token 构造一个实例。
#[derive(Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl DirectoryClient {
    pub fn new(http: Client, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// GET 并解析为数组
    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, DirectoryError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.http.get(&url).bearer_auth(&self.access_token);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status { status, url });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn search_clients_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<ClientRecord>, DirectoryError> {
        self.get_list("/clienteBean", &[("email", email)]).await
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>, DirectoryError> {
        self.get_list("/clienteBean", &[]).await
    }

    async fn list_points_of_sale(&self) -> Result<Vec<PointOfSale>, DirectoryError> {
        self.get_list("/puntoVentaBean", &[]).await
    }

    async fn list_ledger_entries(
        &self,
        point_of_sale_code: &str,
        letter: &str,
    ) -> Result<Vec<LedgerEntry>, DirectoryError> {
        let tipo = format!("Facturas de Venta {}", letter);
        self.get_list(
            "/talonario",
            &[
                ("puntoDeVenta", point_of_sale_code),
                ("letraComprobante", letter),
                ("tipoComprobante", tipo.as_str()),
            ],
        )
        .await
    }
}
