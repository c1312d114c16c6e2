use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_string, null_as_default};

/// 订单侧客户记录 (来自订单接入触发器)
///
/// 除用于匹配的字段外，其余字段原样透传给下游开票步骤。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(default, deserialize_with = "null_as_default")]
    pub document_data: DocumentData,
    #[serde(default)]
    pub invoice_type: Option<String>,
    #[serde(default)]
    pub fiscal_category: Option<Value>,
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
    #[serde(default)]
    pub invoice_legend: Option<Value>,
    /// 其余未建模字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    /// 名
    #[serde(default)]
    pub nombre: Option<String>,
    /// 姓
    #[serde(default)]
    pub apellido: Option<String>,
    /// 电话、地址等，原样透传
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub document: Document,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// 税号 (CUIT/DNI)，上游已去除非数字字符
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: Option<String>,
    /// 证件类型等
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomerRecord {
    pub fn email(&self) -> Option<&str> {
        non_empty(self.customer.email.as_deref())
    }

    pub fn document_number(&self) -> Option<&str> {
        non_empty(self.document_data.document.number.as_deref())
    }

    pub fn full_name(&self) -> Option<&str> {
        non_empty(self.customer.full_name.as_deref())
    }

    /// 发票字母，缺省为 B
    pub fn invoice_letter(&self) -> &str {
        non_empty(self.invoice_type.as_deref()).unwrap_or("B")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
