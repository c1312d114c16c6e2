use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient_string;

/// 默认销售点编码
pub const DEFAULT_POINT_OF_SALE_CODE: &str = "00001";

/// 销售点 (puntoVentaBean)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointOfSale {
    #[serde(rename = "puntoVentaId", default)]
    pub punto_venta_id: Option<Value>,
    #[serde(rename = "puntoVenta_id", default)]
    pub punto_venta_id_snake: Option<Value>,
    #[serde(rename = "ID", default)]
    pub id_upper: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(rename = "puntoVenta", default, deserialize_with = "lenient_string")]
    pub punto_venta: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub codigo: Option<String>,
}

impl PointOfSale {
    /// 销售点主键: `puntoVentaId` > `puntoVenta_id` > `ID` > `id`，仅跳过 null
    pub fn identifier(&self) -> Option<Value> {
        [
            &self.punto_venta_id,
            &self.punto_venta_id_snake,
            &self.id_upper,
            &self.id,
        ]
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
        .cloned()
    }

    /// 销售点编码: `puntoVenta` > `codigo` > "00001"
    ///
    /// 纯数字且不足五位的编码左补零，与发票号格式一致。
    pub fn code(&self) -> String {
        let raw = [&self.punto_venta, &self.codigo]
            .into_iter()
            .flatten()
            .find(|c| !c.is_empty());
        match raw {
            Some(code) => pad_code(code),
            None => DEFAULT_POINT_OF_SALE_CODE.to_string(),
        }
    }
}

fn pad_code(code: &str) -> String {
    if code.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>5}", code)
    } else {
        code.to_string()
    }
}

/// 发票号段 (talonario)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "ultimoUtilizado", default)]
    pub ultimo_utilizado: Option<Value>,
}

impl LedgerEntry {
    /// 最后已用号码，按前导整数解析，无法解析或为负数时取 0
    pub fn last_used(&self) -> u64 {
        match &self.ultimo_utilizado {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => leading_integer(s),
            _ => 0,
        }
    }
}

fn leading_integer(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
