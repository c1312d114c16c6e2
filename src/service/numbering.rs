use crate::directory::Directory;
use crate::models::{LookupStep, PointOfSale, Trace, TraceEntry};
use serde_json::Value;

/// 发票字母 → Xubio tipoComprobante，未知字母按 B 处理
pub fn tipo_comprobante(letter: &str) -> u32 {
    match letter {
        "A" => 1,
        "B" => 6,
        "C" => 11,
        "E" => 19,
        _ => 6,
    }
}

/// 发票号: `{字母}-{销售点编码}-{8位序号}`
pub fn format_document_number(letter: &str, point_of_sale_code: &str, number: u64) -> String {
    format!("{}-{}-{:08}", letter, point_of_sale_code, number)
}

/// 开票编号信息
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceNumbering {
    pub point_of_sale_id: Option<Value>,
    pub point_of_sale_code: String,
    pub letter: String,
    pub last_used: u64,
}

impl Default for InvoiceNumbering {
    fn default() -> Self {
        let pv = PointOfSale::default();
        Self {
            point_of_sale_id: None,
            point_of_sale_code: pv.code(),
            letter: "B".to_string(),
            last_used: 0,
        }
    }
}

impl InvoiceNumbering {
    pub fn next_number(&self) -> u64 {
        self.last_used.saturating_add(1)
    }

    pub fn document_number(&self) -> String {
        format_document_number(&self.letter, &self.point_of_sale_code, self.next_number())
    }

    pub fn tipo_comprobante(&self) -> u32 {
        tipo_comprobante(&self.letter)
    }
}

/// 查询销售点与号段，计算下一张发票号
///
/// 任一调用失败都只记录到追踪日志，使用默认值继续。
pub async fn prepare_numbering<D: Directory + ?Sized>(
    directory: &D,
    letter: &str,
    trace: &mut Trace,
) -> InvoiceNumbering {
    let point_of_sale = match directory.list_points_of_sale().await {
        Ok(list) => {
            let pv = list.into_iter().next();
            if let Some(pv) = &pv {
                let id = match pv.identifier() {
                    Some(Value::String(s)) => s,
                    Some(v) => v.to_string(),
                    None => "null".to_string(),
                };
                trace.push(TraceEntry::info(
                    LookupStep::PointOfSale,
                    format!("PuntoVenta ID: {}, Codigo: {}", id, pv.code()),
                ));
            }
            pv
        }
        Err(e) => {
            trace.push(TraceEntry::failed(LookupStep::PointOfSale, "PuntoVenta", e));
            None
        }
    };
    let point_of_sale = point_of_sale.unwrap_or_default();
    let point_of_sale_code = point_of_sale.code();

    let last_used = match directory
        .list_ledger_entries(&point_of_sale_code, letter)
        .await
    {
        Ok(entries) => match entries.first() {
            Some(entry) => {
                let last = entry.last_used();
                trace.push(TraceEntry::info(
                    LookupStep::Ledger,
                    format!("Ultimo utilizado Factura {}: {}", letter, last),
                ));
                last
            }
            None => 0,
        },
        Err(e) => {
            trace.push(TraceEntry::failed(LookupStep::Ledger, "Talonario", e));
            0
        }
    };

    InvoiceNumbering {
        point_of_sale_id: point_of_sale.identifier(),
        point_of_sale_code,
        letter: letter.to_string(),
        last_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::FakeDirectory;
    use serde_json::json;

    #[test]
    fn document_number_is_zero_padded() {
        let numbering = InvoiceNumbering {
            point_of_sale_code: "00001".into(),
            letter: "B".into(),
            last_used: 42,
            ..InvoiceNumbering::default()
        };
        assert_eq!(numbering.next_number(), 43);
        assert_eq!(numbering.document_number(), "B-00001-00000043");
    }

    #[test]
    fn letter_table_defaults_to_six() {
        assert_eq!(tipo_comprobante("A"), 1);
        assert_eq!(tipo_comprobante("B"), 6);
        assert_eq!(tipo_comprobante("C"), 11);
        assert_eq!(tipo_comprobante("E"), 19);
        assert_eq!(tipo_comprobante("M"), 6);
        assert_eq!(format_document_number("M", "00002", 1), "M-00002-00000001");
    }

    #[tokio::test]
    async fn uses_first_point_of_sale_and_ledger_entry() {
        let directory = FakeDirectory::new()
            .with_points_of_sale(vec![
                json!({ "puntoVentaId": 55, "puntoVenta": "00003" }),
                json!({ "puntoVentaId": 56, "puntoVenta": "00009" }),
            ])
            .with_ledger(vec![json!({ "ultimoUtilizado": "120" })]);
        let mut trace = Trace::new();

        let numbering = prepare_numbering(&directory, "A", &mut trace).await;

        assert_eq!(numbering.point_of_sale_id, Some(json!(55)));
        assert_eq!(numbering.document_number(), "A-00003-00000121");
        assert_eq!(
            directory.ledger_requests(),
            vec![("00003".to_string(), "A".to_string())]
        );
        assert_eq!(
            trace.messages(),
            vec!["PuntoVenta ID: 55, Codigo: 00003", "Ultimo utilizado Factura A: 120"]
        );
    }

    #[tokio::test]
    async fn failures_fall_back_to_defaults() {
        let directory = FakeDirectory::new().failing_numbering();
        let mut trace = Trace::new();

        let numbering = prepare_numbering(&directory, "B", &mut trace).await;

        assert_eq!(numbering.point_of_sale_id, None);
        assert_eq!(numbering.document_number(), "B-00001-00000001");
        assert_eq!(trace.entries().len(), 2);
        assert!(trace.messages()[0].starts_with("PuntoVenta error:"));
        assert!(trace.messages()[1].starts_with("Talonario error:"));
    }
}
