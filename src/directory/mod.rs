pub mod client;
pub mod error;
pub mod http;

pub use client::DirectoryClient;
pub use error::DirectoryError;
pub use http::create_http_client;

use crate::models::{ClientRecord, LedgerEntry, PointOfSale};
use async_trait::async_trait;

/// 发票目录服务提供的只读查询
#[async_trait]
pub trait Directory: Send + Sync {
    /// `GET /clienteBean?email=`
    async fn search_clients_by_email(&self, email: &str)
        -> Result<Vec<ClientRecord>, DirectoryError>;

    /// `GET /clienteBean`
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, DirectoryError>;

    /// `GET /puntoVentaBean`
    async fn list_points_of_sale(&self) -> Result<Vec<PointOfSale>, DirectoryError>;

    /// `GET /talonario`
    async fn list_ledger_entries(
        &self,
        point_of_sale_code: &str,
        letter: &str,
    ) -> Result<Vec<LedgerEntry>, DirectoryError>;
}
