use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::lenient_string;

/// 目录服务中的客户 (clienteBean)
///
/// 不同版本的接口把主键放在不同字段上，统一通过 [`ClientRecord::client_id`] 读取。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<Value>,
    #[serde(rename = "clienteId", default, skip_serializing_if = "Option::is_none")]
    pub cliente_id_camel: Option<Value>,
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id_upper: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(rename = "razonSocial", default)]
    pub razon_social: Option<String>,
    #[serde(rename = "primerNombre", default)]
    pub primer_nombre: Option<String>,
    #[serde(rename = "primerApellido", default)]
    pub primer_apellido: Option<String>,
    /// 税号，可能带有 `-` 等格式字符
    #[serde(default, deserialize_with = "lenient_string")]
    pub cuit: Option<String>,
}

impl ClientRecord {
    /// 提取客户主键
    ///
    /// 字段优先级: `cliente_id` > `clienteId` > `ID` > `id`。
    /// null、空字符串、数值 0 与 `false` 视为空值，继续查看下一个字段。
    pub fn client_id(&self) -> Option<ClientId> {
        [
            &self.cliente_id,
            &self.cliente_id_camel,
            &self.id_upper,
            &self.id,
        ]
        .into_iter()
        .flatten()
        .find_map(ClientId::from_value)
    }
}

/// 客户主键，保留接口返回时的数值或字符串形态
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(serde_json::Number),
    Text(String),
}

impl ClientId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                Some(Self::Number(n.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(value: Value) -> ClientRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_precedence_follows_field_order() {
        let c = client(json!({ "cliente_id": 7, "clienteId": 8, "ID": 9, "id": 10 }));
        assert_eq!(c.client_id(), Some(ClientId::Number(7.into())));

        let c = client(json!({ "clienteId": "abc", "id": 10 }));
        assert_eq!(c.client_id(), Some(ClientId::Text("abc".into())));

        let c = client(json!({ "ID": 9, "id": 10 }));
        assert_eq!(c.client_id(), Some(ClientId::Number(9.into())));
    }

    #[test]
    fn empty_identifier_values_are_skipped() {
        let c = client(json!({ "cliente_id": "", "clienteId": 0, "ID": null, "id": 42 }));
        assert_eq!(c.client_id(), Some(ClientId::Number(42.into())));

        let c = client(json!({ "cliente_id": false }));
        assert_eq!(c.client_id(), None);
    }

    #[test]
    fn numeric_cuit_is_read_as_text() {
        let c = client(json!({ "cuit": 20123456789u64, "nombre": "Acme" }));
        assert_eq!(c.cuit.as_deref(), Some("20123456789"));
    }

    #[test]
    fn client_id_serializes_as_received() {
        assert_eq!(serde_json::to_value(ClientId::Number(5.into())).unwrap(), json!(5));
        assert_eq!(serde_json::to_value(ClientId::Text("x1".into())).unwrap(), json!("x1"));
        assert_eq!(ClientId::Number(5.into()).to_string(), "5");
    }
}
