use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{null_as_default, ClientId, Customer, DocumentData, TraceEntry};

/// 客户查找 + 开票准备结果 (下游开票步骤的输入，也是重试查找的输入)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupResult {
    pub client_exists: bool,
    pub existing_client_id: Option<ClientId>,
    pub existing_client_name: Option<String>,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub document_data: DocumentData,
    #[serde(default)]
    pub fiscal_category: Option<Value>,
    pub invoice_type: String,
    pub tipo_comprobante: u32,
    #[serde(default)]
    pub punto_venta_id: Option<Value>,
    pub punto_venta_codigo: String,
    pub numero_documento: String,
    #[serde(default)]
    pub transaccion_producto_items: Option<Value>,
    #[serde(default)]
    pub product_summary: Option<Value>,
    #[serde(default)]
    pub order_total: Option<Value>,
    #[serde(default)]
    pub shopify_order_id: Option<Value>,
    #[serde(default)]
    pub shopify_order_number: Option<Value>,
    #[serde(default)]
    pub currency: Option<Value>,
    #[serde(rename = "access_token")]
    pub access_token: String,
    #[serde(default)]
    pub invoice_legend: Option<Value>,
    #[serde(default)]
    pub debug: Vec<String>,
    #[serde(default)]
    pub trace: Vec<TraceEntry>,
    /// 订单记录中其余未建模字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LookupResult {
    /// 由本结构自身写出的字段名，透传字段不得与之重名
    pub const OWN_FIELDS: &'static [&'static str] = &[
        "clientExists",
        "existingClientId",
        "existingClientName",
        "invoiceType",
        "tipoComprobante",
        "puntoVentaId",
        "puntoVentaCodigo",
        "numeroDocumento",
        "access_token",
        "debug",
        "trace",
    ];
}

/// 重试查找读取的字段
///
/// 上游传来的 `lookupData` 可能只是中间结果，缺少的字段一律取默认值；
/// 整个 `lookupData` 仍按原样回传。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryInput {
    #[serde(rename = "access_token")]
    pub access_token: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(rename = "documentData", deserialize_with = "null_as_default")]
    pub document_data: DocumentData,
    #[serde(rename = "shopifyOrderNumber")]
    pub shopify_order_number: Option<Value>,
}

impl RetryInput {
    pub fn from_lookup_data(data: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(data)
    }

    pub fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or_default()
    }
}

pub const RETRY_FAILED_MESSAGE: &str = "Client creation failed and retry lookup also failed";
pub const RETRY_FAILED_ERROR_TYPE: &str = "RETRY_FAILED";

/// 重试查找结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RetryOutcome {
    Recovered(RecoveredClient),
    Fatal(FatalLookupFailure),
}

impl RetryOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

/// 已找到既有客户，流水线可按创建成功继续
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredClient {
    #[serde(rename = "cliente_id")]
    pub cliente_id: ClientId,
    pub invoice_data: Value,
    pub recovered_from_error: bool,
    pub debug: Vec<String>,
    pub trace: Vec<TraceEntry>,
}

/// 所有策略均未找到客户，需要人工介入
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FatalLookupFailure {
    pub success: bool,
    pub fatal_error: bool,
    pub error_message: String,
    pub lookup_data: Value,
    pub debug: Vec<String>,
    pub trace: Vec<TraceEntry>,
    pub requires_notification: bool,
    pub error_type: String,
}
